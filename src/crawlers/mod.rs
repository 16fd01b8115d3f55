pub mod web;

#[cfg(test)]
mod tests;
