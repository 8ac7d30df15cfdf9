pub mod assets;
pub mod camera;
pub mod core;
pub mod layout;
pub mod loading;
pub mod proximity;
pub mod scene;
pub mod systems;
