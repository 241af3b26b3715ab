//! # OpenGL Device
//!
//! Draws every primitive as one unit quad, a four-vertex triangle strip,
//! positioned and textured through uniforms.

use glow::HasContext;
use slotmap::SlotMap;

use super::shader::QuadProgram;
use crate::foundation::thread::ThreadAffinity;
use crate::render::device::validate_upload;
use crate::render::{Color, DeviceError, GraphicsDevice, PixelFormat, Rect, TextureUpload};
use crate::texture::{TextureId, UvRect};

/// Triangle strip covering the unit square
const QUAD_VERTICES: [f32; 8] = [0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0];

struct QuadPipeline {
    program: QuadProgram,
    vertex_array: glow::VertexArray,
    vertex_buffer: glow::Buffer,
}

/// [`GraphicsDevice`] backed by an OpenGL 3.3 core context
pub struct GlDevice {
    gl: glow::Context,
    pipeline: Option<QuadPipeline>,
    textures: SlotMap<TextureId, glow::Texture>,
    affinity: ThreadAffinity,
}

impl std::fmt::Debug for GlDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlDevice")
            .field("textures", &self.textures.len())
            .field("pipeline", &self.pipeline.is_some())
            .finish_non_exhaustive()
    }
}

impl GlDevice {
    /// Load OpenGL through `loader` and build the quad pipeline
    ///
    /// The context `loader` resolves symbols for must be current on the
    /// calling thread.
    pub fn from_loader<F>(loader: F) -> Result<Self, DeviceError>
    where
        F: FnMut(&str) -> *const std::ffi::c_void,
    {
        let gl = unsafe { glow::Context::from_loader_function(loader) };
        Self::new(gl)
    }

    /// Build the quad pipeline on the current context
    ///
    /// Must be called on the thread owning the context; later calls are
    /// checked against it.
    pub fn new(gl: glow::Context) -> Result<Self, DeviceError> {
        let program = QuadProgram::new(&gl)?;

        let (vertex_array, vertex_buffer) = unsafe {
            let vertex_array = gl
                .create_vertex_array()
                .map_err(|e| DeviceError::Creation(format!("vertex array: {e}")))?;
            let vertex_buffer = gl
                .create_buffer()
                .map_err(|e| DeviceError::Creation(format!("vertex buffer: {e}")))?;

            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(&QUAD_VERTICES), glow::STATIC_DRAW);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 0, 0);
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            (vertex_array, vertex_buffer)
        };

        log::info!("OpenGL quad pipeline ready");
        Ok(Self {
            gl,
            pipeline: Some(QuadPipeline {
                program,
                vertex_array,
                vertex_buffer,
            }),
            textures: SlotMap::with_key(),
            affinity: ThreadAffinity::current(),
        })
    }
}

impl GraphicsDevice for GlDevice {
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> Result<TextureId, DeviceError> {
        self.affinity.ensure("GlDevice::create_texture");
        validate_upload(upload)?;

        let format = match upload.format {
            PixelFormat::Rgb8 => glow::RGB,
            PixelFormat::Rgba8 => glow::RGBA,
        };

        let texture = unsafe {
            let texture = self
                .gl
                .create_texture()
                .map_err(|e| DeviceError::Creation(format!("texture: {e}")))?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                upload.width as i32,
                upload.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(upload.data),
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };

        log::debug!("Uploaded {}x{} {:?} texture", upload.width, upload.height, upload.format);
        Ok(self.textures.insert(texture))
    }

    fn delete_texture(&mut self, id: TextureId) {
        self.affinity.ensure("GlDevice::delete_texture");
        if let Some(texture) = self.textures.remove(id) {
            unsafe { self.gl.delete_texture(texture) };
        }
    }

    fn begin_frame(&mut self, width: u32, height: u32) {
        self.affinity.ensure("GlDevice::begin_frame");
        let Some(pipeline) = &self.pipeline else {
            log::warn!("Frame started after device cleanup");
            return;
        };
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
            self.gl.use_program(Some(pipeline.program.program));
            self.gl.uniform_1_i32(pipeline.program.image.as_ref(), 0);
            self.gl.active_texture(glow::TEXTURE0);
            self.gl.bind_vertex_array(Some(pipeline.vertex_array));
            self.gl.enable(glow::BLEND);
            self.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            self.gl.disable(glow::DEPTH_TEST);
        }
    }

    fn end_frame(&mut self) {
        self.affinity.ensure("GlDevice::end_frame");
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            self.gl.enable(glow::DEPTH_TEST);
            self.gl.disable(glow::BLEND);
            self.gl.use_program(None);
        }
    }

    fn draw_quad(&mut self, texture: TextureId, rect: Rect, uv: UvRect) {
        self.affinity.ensure("GlDevice::draw_quad");
        let (Some(pipeline), Some(native)) = (&self.pipeline, self.textures.get(texture)) else {
            log::warn!("Skipping draw of released texture {texture:?}");
            return;
        };
        let program = &pipeline.program;
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(*native));
            self.gl.uniform_2_f32(
                program.screen_position.as_ref(),
                rect.min_x * 2.0 - 1.0,
                rect.min_y * 2.0 - 1.0,
            );
            self.gl.uniform_2_f32(program.size.as_ref(), rect.width() * 2.0, rect.height() * 2.0);
            let [min_u, min_v, max_u, max_v] = uv.to_array();
            self.gl.uniform_4_f32(program.uv.as_ref(), min_u, min_v, max_u, max_v);
            self.gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
        }
    }

    fn clear(&mut self, color: Color) {
        self.affinity.ensure("GlDevice::clear");
        let [r, g, b, a] = color.to_f32();
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn cleanup(&mut self) {
        self.affinity.ensure("GlDevice::cleanup");
        unsafe {
            for (_, texture) in self.textures.drain() {
                self.gl.delete_texture(texture);
            }
            if let Some(pipeline) = self.pipeline.take() {
                self.gl.delete_program(pipeline.program.program);
                self.gl.delete_vertex_array(pipeline.vertex_array);
                self.gl.delete_buffer(pipeline.vertex_buffer);
                log::debug!("OpenGL quad pipeline released");
            }
        }
    }
}
