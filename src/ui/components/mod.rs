mod input;
mod key_result;
mod search_input;
mod topic_picker;

pub use key_result::KeyResult;
pub use search_input::{SearchEvent, SearchInput};
pub use topic_picker::{TopicPicker, TopicPickerEvent};
