pub mod frame_stage;
