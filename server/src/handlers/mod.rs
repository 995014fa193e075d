pub mod piece_handlers;
