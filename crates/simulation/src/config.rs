pub const GRID_WIDTH: usize = 64;
pub const GRID_HEIGHT: usize = 64;
pub const CELL_SIZE: f32 = 16.0;
pub const WORLD_WIDTH: f32 = GRID_WIDTH as f32 * CELL_SIZE;
pub const WORLD_HEIGHT: f32 = GRID_HEIGHT as f32 * CELL_SIZE;
