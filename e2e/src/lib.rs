pub mod domain;
pub mod util;

#[cfg(test)]
mod tests;
