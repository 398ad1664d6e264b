mod errors;
mod posts;
mod users;
