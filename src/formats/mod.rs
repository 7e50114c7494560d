mod nv21;
mod rgba;
mod visit_2x2;

pub(crate) use nv21::Nv21Writer;
pub(crate) use rgba::RgbaReader;
