mod question;
mod results;

pub use question::render_question;
pub use results::render_results;

pub(crate) use question::render_options;
