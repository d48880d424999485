pub mod card;
pub mod category;
pub mod collection;
pub mod reorder;
pub mod sorting;

pub use card::{Card, CardDraft, CardId, CardPatch};
pub use category::{group_by_category, major_categories, CategoryIndex, MajorGroup, MinorGroup};
pub use collection::Collection;
pub use reorder::{move_card, Placement};
pub use sorting::{sort_cards, SortField, SortOrder};
