pub mod accounting;
