use crate::gui::app::AppMsg;
use crate::gui::canvas::IconImage;
use anyhow::Context;
use arcmenu::IconSource;
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use gtk::gio;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::Sender;
use std::path::{Path, PathBuf};

/// Theme icons are looked up at this size; the menu scales them down.
const THEME_ICON_SIZE: u16 = 128;

/// A source is either a file path or a freedesktop icon name.
pub fn resolve_icon_path(source: &IconSource) -> Option<PathBuf> {
    let path = Path::new(source.as_str());
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    lookup(source.as_str())
        .with_size(THEME_ICON_SIZE)
        .with_scale(1)
        .find()
}

async fn decode(source: &IconSource) -> anyhow::Result<IconImage> {
    let path = resolve_icon_path(source)
        .with_context(|| format!("No file or theme icon named '{}'", source))?;
    let stream = gio::File::for_path(&path)
        .read_future(glib::Priority::DEFAULT)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let pixbuf = Pixbuf::from_stream_future(&stream)
        .await
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(IconImage::from(pixbuf))
}

/// Decodes every icon on the main loop; each result arrives as its own message.
/// `generation` is echoed back so stale results can be told apart after a reload.
pub fn load_all<'a>(
    generation: u64,
    sources: impl IntoIterator<Item = &'a IconSource>,
    sender: &Sender<AppMsg>,
) {
    for (index, source) in sources.into_iter().enumerate() {
        let source = source.clone();
        let sender = sender.clone();
        relm4::spawn_local(async move {
            let msg = match decode(&source).await {
                Ok(image) => AppMsg::IconLoaded(generation, index, image),
                Err(e) => AppMsg::IconFailed(generation, index, format!("{:#}", e)),
            };
            sender.emit(msg);
        });
    }
}
