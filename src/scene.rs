//! Scene scripts.
//!
//! A script is a window size header followed by one command per line:
//!
//! ```text
//! 500 500
//! # comment
//! scale 1 1 1
//! rotate 0 45 0
//! translate 0 0 5
//! object cube.asc 1 0 0 0.8 0.2 10
//! viewport -1 1 -1 1
//! observer 0 0 -10 0 0 0 0 1 100 30
//! ambient 0.2 0.2 0.2
//! light 1 1 1 1 0 10 -10
//! background 0 0 0
//! display
//! end
//! ```
//!
//! Parsing produces a list of [`Command`]s. Interpretation threads a
//! [`SceneState`] through [`SceneState::apply`], which consumes the state and
//! returns the updated one together with a [`Step`] telling the caller
//! whether to render.

use std::fs;
use std::ops::ControlFlow;
use std::path::Path;

use log::{debug, warn};

use crate::camera::Observer;
use crate::colors::Color;
use crate::error::{Result, SceneError};
use crate::light::{place_light, Ambient, Material, PointLight};
use crate::math::Vec4;
use crate::mesh::MeshSource;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::MAX_DIMENSION;
use crate::transform::Transform;
use crate::viewport::Viewport;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `TM = S * TM`
    Scale { x: f64, y: f64, z: f64 },
    /// Rotation about the first axis with a non-zero angle, in degrees.
    Rotate { x: f64, y: f64, z: f64 },
    Translate { x: f64, y: f64, z: f64 },
    Viewport { vxl: f64, vxr: f64, vyb: f64, vyt: f64 },
    Observer {
        eye: Vec4,
        center_of_interest: Vec4,
        tilt: f64,
        hither: f64,
        yon: f64,
        half_angle: f64,
    },
    /// Load a mesh and bake the current transform into it. Without a
    /// material the object is plain white.
    Object { path: String, material: Option<Material> },
    /// 1-based light slot.
    Light { index: usize, light: PointLight },
    Ambient(Ambient),
    Background(Color),
    NoBackFaces,
    Display,
    /// `TM = I`
    Reset,
    End,
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: usize, text: &str) -> std::result::Result<Option<Self>, SceneError> {
        let mut tokens = text.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(None);
        };
        if keyword.starts_with('#') {
            return Ok(None);
        }
        let args: Vec<&str> = tokens.collect();

        let command = match keyword {
            "scale" => {
                let [x, y, z] = numbers(line, "scale", &args)?;
                Command::Scale { x, y, z }
            }
            "rotate" => {
                let [x, y, z] = numbers(line, "rotate", &args)?;
                Command::Rotate { x, y, z }
            }
            "translate" => {
                let [x, y, z] = numbers(line, "translate", &args)?;
                Command::Translate { x, y, z }
            }
            "viewport" => {
                let [vxl, vxr, vyb, vyt] = numbers(line, "viewport", &args)?;
                Command::Viewport { vxl, vxr, vyb, vyt }
            }
            "observer" => {
                let [ex, ey, ez, cx, cy, cz, tilt, hither, yon, half_angle] =
                    numbers(line, "observer", &args)?;
                Command::Observer {
                    eye: Vec4::point(ex, ey, ez),
                    center_of_interest: Vec4::point(cx, cy, cz),
                    tilt,
                    hither,
                    yon,
                    half_angle,
                }
            }
            "object" => parse_object(line, &args)?,
            "light" => parse_light(line, &args)?,
            "ambient" => {
                let [r, g, b] = numbers(line, "ambient", &args)?;
                Command::Ambient(Ambient(Color::new(r, g, b)))
            }
            "background" => {
                let [r, g, b] = numbers(line, "background", &args)?;
                Command::Background(Color::new(r, g, b))
            }
            "nobackfaces" => Command::NoBackFaces,
            "display" => Command::Display,
            "reset" => Command::Reset,
            "end" => Command::End,
            other => {
                return Err(SceneError::UnknownCommand {
                    line,
                    keyword: other.to_string(),
                })
            }
        };
        Ok(Some(command))
    }
}

fn parse_object(line: usize, args: &[&str]) -> std::result::Result<Command, SceneError> {
    let Some((&path, rest)) = args.split_first() else {
        return Err(SceneError::MissingArgument {
            line,
            command: "object",
            expected: 1,
        });
    };
    let material = if rest.is_empty() {
        None
    } else {
        let [r, g, b, kd, ks, n] = numbers(line, "object", rest).map_err(|err| match err {
            SceneError::MissingArgument { .. } => SceneError::MissingArgument {
                line,
                command: "object",
                expected: 7,
            },
            other => other,
        })?;
        Some(Material::new(Color::new(r, g, b), kd, ks, n))
    };
    Ok(Command::Object {
        path: path.to_string(),
        material,
    })
}

fn parse_light(line: usize, args: &[&str]) -> std::result::Result<Command, SceneError> {
    let Some((&index, rest)) = args.split_first() else {
        return Err(SceneError::MissingArgument {
            line,
            command: "light",
            expected: 7,
        });
    };
    let index: usize = index.parse().map_err(|_| SceneError::InvalidNumber {
        line,
        token: index.to_string(),
    })?;
    if index == 0 {
        return Err(SceneError::InvalidLightIndex { line });
    }
    let [r, g, b, x, y, z] = numbers(line, "light", rest).map_err(|err| match err {
        SceneError::MissingArgument { .. } => SceneError::MissingArgument {
            line,
            command: "light",
            expected: 7,
        },
        other => other,
    })?;
    Ok(Command::Light {
        index,
        light: PointLight::new(Color::new(r, g, b), Vec4::point(x, y, z)),
    })
}

/// Parses the first `K` arguments as numbers. Extra arguments are ignored.
fn numbers<const K: usize>(
    line: usize,
    command: &'static str,
    args: &[&str],
) -> std::result::Result<[f64; K], SceneError> {
    if args.len() < K {
        return Err(SceneError::MissingArgument {
            line,
            command,
            expected: K,
        });
    }
    if args.len() > K {
        warn!("line {line}: ignoring {} extra arguments to `{command}`", args.len() - K);
    }
    let mut values = [0.0; K];
    for (value, token) in values.iter_mut().zip(args) {
        *value = token.parse().map_err(|_| SceneError::InvalidNumber {
            line,
            token: token.to_string(),
        })?;
    }
    Ok(values)
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub width: u32,
    pub height: u32,
    /// Commands with their 1-based line numbers.
    pub commands: Vec<(usize, Command)>,
}

impl Script {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::parse(&source)?)
    }

    pub fn parse(source: &str) -> std::result::Result<Self, SceneError> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(i, text)| (i + 1, text))
            .filter(|(_, text)| {
                let text = text.trim_start();
                !text.is_empty() && !text.starts_with('#')
            });

        let (header_line, header) = lines
            .next()
            .ok_or(SceneError::InvalidWindowSize { line: 1 })?;
        let (width, height) =
            parse_window_size(header).ok_or(SceneError::InvalidWindowSize { line: header_line })?;

        let mut commands = Vec::new();
        for (line, text) in lines {
            if let Some(command) = Command::parse(line, text)? {
                commands.push((line, command));
            }
        }
        Ok(Self {
            width,
            height,
            commands,
        })
    }
}

fn parse_window_size(header: &str) -> Option<(u32, u32)> {
    let mut tokens = header.split_whitespace();
    let width: u32 = tokens.next()?.parse().ok()?;
    let height: u32 = tokens.next()?.parse().ok()?;
    let valid = 1..=MAX_DIMENSION;
    (valid.contains(&width) && valid.contains(&height)).then_some((width, height))
}

/// What the interpreter should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Render the current scene.
    Display,
    /// Stop interpreting.
    End,
}

/// Interpreter context.
#[derive(Debug, Clone)]
pub struct SceneState {
    width: u32,
    height: u32,
    transform: Transform,
    viewport: Option<Viewport>,
    observer: Option<Observer>,
    models: Vec<Model>,
    lights: Vec<PointLight>,
    ambient: Ambient,
    background: Color,
    cull_back_faces: bool,
}

impl SceneState {
    /// Empty scene for a window of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            transform: Transform::new(),
            viewport: None,
            observer: None,
            models: Vec::new(),
            lights: Vec::new(),
            ambient: Ambient::default(),
            background: Color::BLACK,
            cull_back_faces: false,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Applies one command. Mesh files are read through `meshes`.
    pub fn apply(mut self, command: Command, meshes: &dyn MeshSource) -> Result<(Self, Step)> {
        match command {
            Command::Scale { x, y, z } => self.transform = self.transform.scale(x, y, z),
            Command::Rotate { x, y, z } => self.transform = self.transform.rotate(x, y, z),
            Command::Translate { x, y, z } => self.transform = self.transform.translate(x, y, z),
            Command::Reset => self.transform = Transform::new(),
            Command::Viewport { vxl, vxr, vyb, vyt } => {
                self.viewport = Some(Viewport::new(vxl, vxr, vyb, vyt, self.width, self.height)?);
            }
            Command::Observer {
                eye,
                center_of_interest,
                tilt,
                hither,
                yon,
                half_angle,
            } => {
                let projection = Projection::from_degrees(hither, yon, half_angle);
                self.observer = Some(Observer::new(eye, center_of_interest, tilt, projection));
            }
            Command::Object { path, material } => {
                let mesh = meshes.load(&path)?.transformed(self.transform.matrix());
                debug!("placed {} with {} faces", path, mesh.face_count());
                self.models
                    .push(Model::new(path, mesh, material.unwrap_or_default()));
            }
            Command::Light { index, light } => place_light(&mut self.lights, index, light),
            Command::Ambient(ambient) => self.ambient = ambient,
            Command::Background(color) => self.background = color,
            Command::NoBackFaces => self.cull_back_faces = true,
            Command::Display => return Ok((self, Step::Display)),
            Command::End => return Ok((self, Step::End)),
        }
        Ok((self, Step::Continue))
    }

    /// Snapshot for rendering. Needs a viewport and an observer.
    pub fn scene(&self) -> std::result::Result<Scene<'_>, SceneError> {
        let viewport = self
            .viewport
            .ok_or(SceneError::MissingState { what: "viewport" })?;
        let observer = self
            .observer
            .ok_or(SceneError::MissingState { what: "observer" })?;
        Ok(Scene {
            viewport,
            observer,
            models: &self.models,
            lights: &self.lights,
            ambient: self.ambient,
            background: self.background,
            cull_back_faces: self.cull_back_faces,
        })
    }
}

/// Everything one frame is rendered from.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub viewport: Viewport,
    pub observer: Observer,
    pub models: &'a [Model],
    pub lights: &'a [PointLight],
    pub ambient: Ambient,
    pub background: Color,
    /// Set by `nobackfaces`.
    pub cull_back_faces: bool,
}

/// Interprets `script` from the start, calling `on_display` for every
/// `display`. Stops at `end`, after the last command, or when `on_display`
/// breaks. Returns the number of frames displayed.
pub fn run<F>(script: &Script, meshes: &dyn MeshSource, mut on_display: F) -> Result<usize>
where
    F: FnMut(usize, &Scene) -> Result<ControlFlow<()>>,
{
    let mut state = SceneState::new(script.width, script.height);
    let mut frames = 0;
    for (line, command) in &script.commands {
        debug!("line {line}: {command:?}");
        let (next, step) = state.apply(command.clone(), meshes)?;
        state = next;
        match step {
            Step::Continue => {}
            Step::Display => {
                let flow = on_display(frames, &state.scene()?)?;
                frames += 1;
                if flow.is_break() {
                    break;
                }
            }
            Step::End => break,
        }
    }
    Ok(frames)
}
