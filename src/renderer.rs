// Renderer struct that handles WebGl calls for the star streaks. Owns the
// line shader, the matrix for projecting screen coordinates into clip space,
// and the CPU-side staging arrays re-uploaded to the GPU every frame.

use crate::star::LineSegment;
use crate::webgl_helpers;
use wasm_bindgen::JsCast;
use web_sys::{console, WebGlBuffer, WebGlProgram, WebGlRenderingContext};
extern crate nalgebra_glm as glm;
use glm::TMat4;

pub struct Renderer {
    pub context: WebGlRenderingContext,
    pub projection_mat: TMat4<f32>,
    pub star_vertex_buffer: WebGlBuffer,
    pub star_color_buffer: WebGlBuffer,
    pub star_shader: WebGlProgram,
    pub star_vertex_array: Vec<f32>,
    pub star_color_array: Vec<u8>,
}

impl Renderer {
    // On creation grabs reference to WebGl context from canvas on the DOM
    // and compiles the line shader the whole field is drawn with
    pub fn new(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let context = canvas
            .get_context("webgl")
            .unwrap()
            .unwrap()
            .dyn_into::<WebGlRenderingContext>()
            .unwrap();

        let projection_mat = glm::ortho(
            0.0,
            canvas.width() as f32,
            canvas.height() as f32,
            0.0,
            1.0,
            -1.0,
        );

        let star_vertex_shader = webgl_helpers::compile_shader(
            &context,
            WebGlRenderingContext::VERTEX_SHADER,
            r#"
            attribute vec2 a_Position;
            attribute vec4 a_Color;

            uniform mat4 u_Proj;

            varying vec4 v_Color;

            void main() {
                gl_Position = u_Proj * vec4(a_Position, 0.0, 1.0);
                v_Color = a_Color;
            }
        "#,
        )
        .unwrap();
        let star_fragment_shader = webgl_helpers::compile_shader(
            &context,
            WebGlRenderingContext::FRAGMENT_SHADER,
            r#"
            precision mediump float;
            varying vec4 v_Color;

            void main() {
                gl_FragColor = v_Color;
            }
        "#,
        )
        .unwrap();
        let star_shader =
            webgl_helpers::link_program(&context, &star_vertex_shader, &star_fragment_shader)
                .unwrap();

        let star_vertex_buffer = context
            .create_buffer()
            .ok_or("failed to create buffer")
            .unwrap();
        let star_color_buffer = context
            .create_buffer()
            .ok_or("failed to create buffer")
            .unwrap();

        Renderer {
            context,
            projection_mat,
            star_vertex_buffer,
            star_color_buffer,
            star_shader,
            star_vertex_array: Vec::new(),
            star_color_array: Vec::new(),
        }
    }

    pub fn clear_screen(&self) {
        self.context.clear_color(0.0, 0.0, 0.0, 1.0);
        self.context.clear(WebGlRenderingContext::COLOR_BUFFER_BIT);
    }

    // Two vertices per star: tail of the streak, then the extended head
    pub fn render_stars(&mut self, segments: &[LineSegment]) {
        self.context.use_program(Some(&self.star_shader));

        let position_attrib_location = self
            .context
            .get_attrib_location(&self.star_shader, "a_Position");
        let color_attrib_location = self
            .context
            .get_attrib_location(&self.star_shader, "a_Color");
        if position_attrib_location < 0 || color_attrib_location < 0 {
            console::log_1(&"Invalid attribute location".into());
        }

        self.star_vertex_array.resize(segments.len() * 4, 0.0);
        self.star_color_array.resize(segments.len() * 8, 0x00);
        for (i, segment) in segments.iter().enumerate() {
            let pos_idx = i * 4;
            let color_idx = i * 8;
            self.star_vertex_array[pos_idx + 0] = segment.from[0] as f32;
            self.star_vertex_array[pos_idx + 1] = segment.from[1] as f32;
            self.star_vertex_array[pos_idx + 2] = segment.to[0] as f32;
            self.star_vertex_array[pos_idx + 3] = segment.to[1] as f32;

            for vertex in 0..2 {
                let idx = color_idx + vertex * 4;
                self.star_color_array[idx + 0] = segment.color.r;
                self.star_color_array[idx + 1] = segment.color.g;
                self.star_color_array[idx + 2] = segment.color.b;
                self.star_color_array[idx + 3] = segment.color.a;
            }
        }

        self.context.bind_buffer(
            WebGlRenderingContext::ARRAY_BUFFER,
            Some(&self.star_vertex_buffer),
        );
        unsafe {
            let vertex_array = js_sys::Float32Array::view(&self.star_vertex_array);
            self.context.buffer_data_with_array_buffer_view(
                WebGlRenderingContext::ARRAY_BUFFER,
                &vertex_array,
                WebGlRenderingContext::DYNAMIC_DRAW,
            );
        }
        self.context.vertex_attrib_pointer_with_i32(
            position_attrib_location as u32,
            2,
            WebGlRenderingContext::FLOAT,
            false,
            0,
            0,
        );
        self.context
            .enable_vertex_attrib_array(position_attrib_location as u32);

        self.context.bind_buffer(
            WebGlRenderingContext::ARRAY_BUFFER,
            Some(&self.star_color_buffer),
        );
        unsafe {
            let color_array = js_sys::Uint8Array::view(&self.star_color_array);
            self.context.buffer_data_with_array_buffer_view(
                WebGlRenderingContext::ARRAY_BUFFER,
                &color_array,
                WebGlRenderingContext::DYNAMIC_DRAW,
            );
        }
        self.context.vertex_attrib_pointer_with_i32(
            color_attrib_location as u32,
            4,
            WebGlRenderingContext::UNSIGNED_BYTE,
            true,
            0,
            0,
        );
        self.context
            .enable_vertex_attrib_array(color_attrib_location as u32);

        let u_proj_location = self
            .context
            .get_uniform_location(&self.star_shader, "u_Proj")
            .expect("Failed to get u_Proj uniform location");
        self.context.uniform_matrix4fv_with_f32_array(
            Some(&u_proj_location),
            false,
            self.projection_mat.as_slice(),
        );

        self.context
            .draw_arrays(WebGlRenderingContext::LINES, 0, segments.len() as i32 * 2);
    }
}
