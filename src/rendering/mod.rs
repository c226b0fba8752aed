pub mod png;

pub use self::png::encode_png;
