mod client;
mod health;
mod status;
