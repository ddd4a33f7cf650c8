pub mod de;
pub mod forms;
