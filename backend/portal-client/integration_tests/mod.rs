mod client;
mod helpers;
mod query;
mod session;
