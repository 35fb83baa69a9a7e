mod editor;

use zeta::prelude::*;

use crate::editor::{BACKGROUND, Editor};

fn main() -> Result<(), WindowError> {
    let config = Config::from_env();
    zeta::init(&config);

    run_app(|ctx| {
        let window = ctx.create_window(
            WindowDescriptor::new("Editor", 1280, 720).with_background(BACKGROUND),
        )?;
        Ok(Box::new(Editor::new(window)))
    })
}
