mod write;

pub(crate) use write::Nv21Writer;
