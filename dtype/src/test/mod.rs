pub mod proptests;

#[cfg(test)]
pub mod unit;
