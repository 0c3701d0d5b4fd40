use std::path::PathBuf;

use anyhow::{Result, bail};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

pub fn pick_todo_file() -> Result<PathBuf> {
    match FileDialog::new()
        .set_title("Choose a todo file")
        .add_filter("Text", &["txt"])
        .add_filter("All files", &["*"])
        .pick_file()
    {
        Some(path) => Ok(path),
        None => bail!("no todo file selected"),
    }
}

pub fn confirm_quit() -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Wallclock")
        .set_description("Quit the clock?")
        .set_buttons(MessageButtons::YesNo)
        .show();
    answer == MessageDialogResult::Yes
}

pub fn show_fatal(message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Wallclock")
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
