use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::shader;
use crate::camera::Camera;
use crate::config::{CameraConfig, FieldConfig};
use crate::error::InitError;
use crate::field::ParticleField;
use crate::particles::{self, POSITION_OFFSET, SIZE_OFFSET, STRIDE_BYTES, VELOCITY_OFFSET};

struct Uniforms {
    time: Option<WebGlUniformLocation>,
    extent: Option<WebGlUniformLocation>,
    attenuation: Option<WebGlUniformLocation>,
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            time: gl.get_uniform_location(program, "time"),
            extent: gl.get_uniform_location(program, "extent"),
            attenuation: gl.get_uniform_location(program, "attenuation"),
            model_view: gl.get_uniform_location(program, "modelViewMatrix"),
            projection: gl.get_uniform_location(program, "projectionMatrix"),
            color: gl.get_uniform_location(program, "color"),
        }
    }
}

/// WebGL2 point-sprite renderer for a [`ParticleField`].
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    // Owned so the GPU buffer lives as long as the vertex array referencing it.
    _buffer: WebGlBuffer,
    uniforms: Uniforms,
    field: ParticleField,
    camera: Camera,
}

impl Renderer {
    /// Acquires a WebGL2 context, compiles the particle program and uploads
    /// the particle buffer. The buffer is never written again.
    pub fn new(canvas: HtmlCanvasElement, field: ParticleField, camera: Camera) -> Result<Self, InitError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;

        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(InitError::NoContext("WebGL2"))?
            .dyn_into()
            .map_err(|_| InitError::WrongElementType("WebGL2 context"))?;

        let program = shader::link_program(&gl, shader::PARTICLE_VERT, shader::PARTICLE_FRAG)?;
        let uniforms = Uniforms::locate(&gl, &program);

        let vao = gl
            .create_vertex_array()
            .ok_or(InitError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl
            .create_buffer()
            .ok_or(InitError::Allocation("particle buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let data = particles::interleave(field.particles());
        let view = js_sys::Float32Array::from(data.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);

        for (name, components, offset) in [
            ("position", 3, POSITION_OFFSET),
            ("velocity", 3, VELOCITY_OFFSET),
            ("size", 1, SIZE_OFFSET),
        ] {
            let location = gl.get_attrib_location(&program, name);
            if location < 0 {
                return Err(InitError::MissingAttribute(name));
            }
            let location = location as u32;
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, STRIDE_BYTES, offset);
        }
        gl.bind_vertex_array(None);

        gl.enable(GL::BLEND);
        // Alpha accumulates as `a + dst * (1 - a)` so the premultiplied
        // canvas composites correctly over the page.
        gl.blend_func_separate(
            GL::SRC_ALPHA,
            GL::ONE_MINUS_SRC_ALPHA,
            GL::ONE,
            GL::ONE_MINUS_SRC_ALPHA,
        );
        gl.enable(GL::DEPTH_TEST);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        log::info!(
            "particle renderer ready: {} particles, {}",
            field.particles().len(),
            gl.get_parameter(GL::VERSION)
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| "unknown GL version".to_string())
        );

        Ok(Self {
            gl,
            canvas,
            program,
            vao,
            _buffer: buffer,
            uniforms,
            field,
            camera,
        })
    }

    /// Matches canvas, viewport and camera aspect to the current window.
    pub fn resize(&mut self) -> Result<(), InitError> {
        let window = window().ok_or(InitError::MissingElement("window"))?;
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        let ratio = window.device_pixel_ratio();

        let buffer_width = (width * ratio) as u32;
        let buffer_height = (height * ratio) as u32;
        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))?;

        self.gl.viewport(0, 0, buffer_width as i32, buffer_height as i32);
        self.camera.set_viewport(width, height);
        log::debug!("resized to {}x{} @{}x", width, height, ratio);
        Ok(())
    }

    /// Advances the field by one frame and draws it.
    pub fn frame(&mut self) {
        self.field.advance();
        self.draw();
    }

    fn draw(&self) {
        let gl = &self.gl;
        let config = self.field.config();
        let model_view = self.camera.view() * self.field.model_matrix();

        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.use_program(Some(&self.program));
        gl.uniform1f(self.uniforms.time.as_ref(), self.field.time());
        gl.uniform1f(self.uniforms.extent.as_ref(), config.extent);
        gl.uniform1f(self.uniforms.attenuation.as_ref(), config.size_attenuation);
        gl.uniform3fv_with_f32_array(self.uniforms.color.as_ref(), &config.color);
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.model_view.as_ref(),
            false,
            &model_view.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            self.uniforms.projection.as_ref(),
            false,
            &self.camera.projection().to_cols_array(),
        );

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::POINTS, 0, self.field.particles().len() as i32);
        gl.bind_vertex_array(None);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn context(&self) -> &GL {
        &self.gl
    }

    /// Drawing-buffer size in device pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }
}

/// Stops a running [`AnimationLoop`]. Cloning shares the same loop.
#[derive(Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    /// Cancels the scheduled frame; no further frames are requested.
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(window)) = (self.pending.take(), window()) {
            window.cancel_animation_frame(id).ok();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// `requestAnimationFrame` loop that renders one frame per display refresh
/// until its [`LoopHandle`] is stopped.
pub struct AnimationLoop;

impl AnimationLoop {
    pub fn start(renderer: Rc<RefCell<Renderer>>) -> Result<LoopHandle, InitError> {
        let handle = LoopHandle {
            running: Rc::new(Cell::new(true)),
            pending: Rc::new(Cell::new(None)),
        };

        // `f` holds the frame closure so it can reschedule itself. The
        // closure keeps `f` alive, which leaks it for the page's lifetime.
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let h = handle.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            h.pending.set(None);
            if !h.running.get() {
                return;
            }
            renderer.borrow_mut().frame();

            if let Some(callback) = f.borrow().as_ref() {
                match request_frame(callback) {
                    Ok(id) => h.pending.set(Some(id)),
                    Err(e) => {
                        log::error!("animation stopped: {:?}", e);
                        h.running.set(false);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        let id = match g.borrow().as_ref() {
            Some(callback) => request_frame(callback)?,
            None => return Err(InitError::Allocation("frame callback")),
        };
        handle.pending.set(Some(id));
        Ok(handle)
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Builds the particle background on the configured canvas and starts it.
pub fn start(field_config: FieldConfig, camera_config: CameraConfig) -> Result<LoopHandle, InitError> {
    let window = window().ok_or(InitError::MissingElement("window"))?;
    let document = window.document().ok_or(InitError::MissingElement("document"))?;
    let canvas = document
        .get_element_by_id(field_config.canvas_id)
        .ok_or(InitError::MissingElement(field_config.canvas_id))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| InitError::WrongElementType(field_config.canvas_id))?;

    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let camera = Camera::new(camera_config, width, height);
    let field = ParticleField::new(field_config, &mut rand::thread_rng());

    let mut renderer = Renderer::new(canvas, field, camera)?;
    renderer.resize()?;
    let (buffer_width, buffer_height) = renderer.canvas_size();
    log::info!(
        "particle background running on a {}x{} canvas",
        buffer_width,
        buffer_height
    );
    let renderer = Rc::new(RefCell::new(renderer));

    let resize_closure = {
        let renderer = renderer.clone();
        Closure::wrap(Box::new(move || {
            if let Err(e) = renderer.borrow_mut().resize() {
                log::error!("resize failed: {}", e);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    AnimationLoop::start(renderer)
}
