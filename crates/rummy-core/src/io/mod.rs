pub mod card_parser;
