mod card_detail;
mod deck;

pub use card_detail::CardDetailView;
pub use deck::DeckView;
