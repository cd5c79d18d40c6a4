pub(crate) mod dialogs;
pub(crate) mod posts_table;
