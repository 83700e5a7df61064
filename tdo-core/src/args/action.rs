use strum_macros::{AsRefStr, EnumIter, EnumString};

/// A fully parsed invocation: one variant per recognized action, carrying
/// exactly the values that action takes.
///
/// Listing is the implicit default, so an empty argument list parses to
/// [`Action::List`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Help,
    List,
    Add {
        title: String,
        description: Option<String>,
    },
    Update {
        id: String,
        title: Option<String>,
        description: Option<String>,
    },
    Delete {
        ids: Vec<String>,
    },
    MarkComplete {
        ids: Vec<String>,
    },
    MarkIncomplete {
        ids: Vec<String>,
    },
}

/// The closed table of leading flags. Any first token outside this table is
/// an unsupported action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumString)]
pub enum ActionFlag {
    #[strum(serialize = "-h")]
    Help,
    #[strum(serialize = "-l")]
    List,
    #[strum(serialize = "-a")]
    Add,
    #[strum(serialize = "-u")]
    Update,
    #[strum(serialize = "-d")]
    Delete,
    #[strum(serialize = "-c")]
    MarkComplete,
    #[strum(serialize = "-r")]
    MarkIncomplete,
}
