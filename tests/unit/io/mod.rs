mod progress;
mod render;
mod visualization;
