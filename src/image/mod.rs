pub mod client;
pub mod options;
pub mod poll;
pub mod response;
