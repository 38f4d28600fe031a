pub mod scripted_emulator;
