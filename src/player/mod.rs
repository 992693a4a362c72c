pub(crate) mod command;
pub(crate) mod hover_loop;
