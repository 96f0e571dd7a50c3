//! Runs PlantUML over a diagram written to a scoped temporary directory and copies the image out.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use thiserror::Error;

const DIAGRAM_FILE: &str = "graph.puml";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("visualization tool {0} not found")]
    ToolNotFound(PathBuf),

    #[error("unsupported output format '{0}', expected png or svg")]
    UnsupportedFormat(String),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("visualization tool exited with {0}")]
    ToolFailed(ExitStatus),

    #[error("visualization tool did not produce {0}")]
    MissingOutput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Picks the format from `path`'s extension, PNG when there is none.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None => Ok(ImageFormat::Png),
            Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(ImageFormat::Png),
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(ImageFormat::Svg),
            Some(ext) => Err(RenderError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    fn flag(&self) -> &'static str {
        match self {
            ImageFormat::Png => "-tpng",
            ImageFormat::Svg => "-tsvg",
        }
    }
}

/// `java -jar plantuml.jar` invoker.
#[derive(Debug, Clone)]
pub struct Visualizer {
    java: PathBuf,
    tool: PathBuf,
}

impl Visualizer {
    pub fn new(java: impl Into<PathBuf>, tool: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            tool: tool.into(),
        }
    }

    fn command(&self, input: &Path, format: ImageFormat) -> Command {
        let mut command = Command::new(&self.java);
        command
            .arg("-jar")
            .arg(&self.tool)
            .arg(format.flag())
            .arg("-charset")
            .arg("UTF-8")
            .arg(input);
        command
    }

    /// Renders `plantuml` into `output`.
    ///
    /// The diagram source lives in a fresh temporary directory that is
    /// removed when this returns, whether the tool succeeded or not.
    pub fn render(&self, plantuml: &str, output: &Path) -> Result<PathBuf, RenderError> {
        if !self.tool.is_file() {
            return Err(RenderError::ToolNotFound(self.tool.clone()));
        }
        let format = ImageFormat::from_path(output)?;

        let workdir = tempfile::Builder::new().prefix("tag-graph-").tempdir()?;
        let input = workdir.path().join(DIAGRAM_FILE);
        fs::write(&input, plantuml)?;

        let mut command = self.command(&input, format);
        tracing::debug!("visualizing graph with command: {:?}", command);
        let status = command.status().map_err(|source| RenderError::Spawn {
            program: self.java.clone(),
            source,
        })?;
        if !status.success() {
            return Err(RenderError::ToolFailed(status));
        }

        let produced = input.with_extension(format.extension());
        if !produced.is_file() {
            return Err(RenderError::MissingOutput(produced));
        }
        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&produced, output)?;
        Ok(output.to_path_buf())
    }
}
