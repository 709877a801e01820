mod action_record;

pub use action_record::{ActionDraft, ActionOutcome, ActionRecord};
