pub mod errors;
pub mod db;
pub mod valve;

#[cfg(test)]
mod tests;
