//! Application-wide constants.

/// Name of the document collection holding community contributions.
pub const CONTRIBUTIONS_COLLECTION: &str = "community-contributions";

/// Fixed key under which the completed-story id sequence is cached locally.
pub const COMPLETED_STORIES_KEY: &str = "completed-stories";

/// Default age restriction applied when the submitter leaves the field blank.
pub const DEFAULT_AGE_RESTRICTION: &str = "all";
