//! JNI entry point for `com.codecrush.mymeeting.NV21Converter`
//!
//! ```java
//! public static native void convertRgbaToNv21(byte[] rgbaInput, int width, int height, byte[] nv21Output);
//! ```
//!
//! `rgbaInput` holds `width * height * 4` bytes in memory order R, G, B, A (what libyuv calls
//! `ABGR`). Invalid arguments raise `IllegalArgumentException` instead of touching memory out
//! of bounds.

use crate::{ConvertError, convert_rgba_to_nv21};
use jni::JNIEnv;
use jni::objects::{JByteArray, JClass, ReleaseMode};
use jni::sys::jint;

const ILLEGAL_ARGUMENT: &str = "java/lang/IllegalArgumentException";
const RUNTIME: &str = "java/lang/RuntimeException";

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("width and height must not be negative, got {width}x{height}")]
    NegativeDimensions { width: jint, height: jint },

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Jni(#[from] jni::errors::Error),
}

impl BridgeError {
    /// The Java exception class to raise, `None` if the JVM already has one pending
    fn exception_class(&self) -> Option<&'static str> {
        match self {
            BridgeError::Jni(jni::errors::Error::JavaException) => None,
            BridgeError::NegativeDimensions { .. } | BridgeError::Convert(_) => {
                Some(ILLEGAL_ARGUMENT)
            }
            BridgeError::Jni(_) => Some(RUNTIME),
        }
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_codecrush_mymeeting_NV21Converter_convertRgbaToNv21<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    rgba_input: JByteArray<'local>,
    width: jint,
    height: jint,
    nv21_output: JByteArray<'local>,
) {
    log::trace!("convertRgbaToNv21 {width}x{height}");

    let Err(e) = convert_arrays(&mut env, &rgba_input, width, height, &nv21_output) else {
        return;
    };

    log::error!("convertRgbaToNv21 failed: {e}");

    if let Some(class) = e.exception_class() {
        if let Err(throw_err) = env.throw_new(class, e.to_string()) {
            log::error!("failed to raise {class}: {throw_err}");
        }
    }
}

fn convert_arrays(
    env: &mut JNIEnv<'_>,
    rgba_input: &JByteArray<'_>,
    width: jint,
    height: jint,
    nv21_output: &JByteArray<'_>,
) -> Result<(), BridgeError> {
    let (width, height) = dimensions(width, height)?;

    // Safety: the arrays are only accessed through these elements until they are dropped,
    // the source is released without copy back (JNI_ABORT), the destination with copy back.
    let rgba = unsafe { env.get_array_elements(rgba_input, ReleaseMode::NoCopyBack)? };
    let mut nv21 = unsafe { env.get_array_elements(nv21_output, ReleaseMode::CopyBack)? };

    convert_rgba_to_nv21(
        bytemuck::cast_slice(&*rgba),
        width,
        height,
        bytemuck::cast_slice_mut(&mut *nv21),
    )?;

    Ok(())
}

fn dimensions(width: jint, height: jint) -> Result<(usize, usize), BridgeError> {
    match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(BridgeError::NegativeDimensions { width, height }),
    }
}
