pub mod errors;
pub mod db;
pub mod patch;
pub mod todo;
pub mod service_context;

#[cfg(test)]
mod tests;
