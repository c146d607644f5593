pub mod character_card;
pub mod character_menu;
pub mod delete_button;
pub mod race_info;
pub mod race_selector;

pub use character_card::{CardGrid, CardStyle, CharacterCard};
pub use character_menu::CharacterMenu;
pub use delete_button::DeleteButton;
pub use race_info::RaceInfoPanel;
pub use race_selector::RaceSelector;
