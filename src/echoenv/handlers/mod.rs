pub mod health;
pub mod hello_world;

pub use health::health;
pub use hello_world::hello_world;
