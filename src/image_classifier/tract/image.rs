use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == width && image.height() == height {
        image.clone()
    } else {
        image.resize_exact(width, height, imageops::FilterType::Triangle)
    }
}

/// NCHW float tensor normalized with the ImageNet channel statistics.
fn image_to_tensor(image: &DynamicImage) -> Tensor {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c]
    })
    .into_tensor()
}

pub fn resize_image_to_tensor(image: &DynamicImage, width: u32, height: u32) -> Tensor {
    let resized = resize_image(image, width, height);
    image_to_tensor(&resized)
}
