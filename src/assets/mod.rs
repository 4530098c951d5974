mod decode;

pub use decode::{decode_image, load_image, pixmap_from_rgba8, pixmap_to_rgba8, save_png};
