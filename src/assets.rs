pub mod decode;

pub use decode::{
    ImageSource, decode_image, decode_pair, decode_source, png_data_uri, resize_to_fit,
};
