pub mod pieces;
