pub mod carousel;
pub mod disclosure;
pub mod grouping;
pub mod normalize;
pub mod portal;
pub mod raw;
pub mod record;
pub mod search;
pub mod section;
pub mod selection;

pub use grouping::AgencyFilter;
pub use normalize::NormalizeConfig;
pub use portal::{Action, ActionError, Portal, SectionView};
pub use search::SearchQuery;
pub use section::{SectionId, SectionStatus};
