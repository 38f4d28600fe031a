//! Binding to the native Arcade Learning Environment through its C interface (`libale_c`).

use std::ffi::{c_char, c_float, c_int, c_uchar, CString};
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use crate::emulator::{AtariAction, Emulator, EmulatorConfig};
use crate::prelude::AleError;

#[repr(C)]
struct AleInterface {
    _private: [u8; 0],
}

#[link(name = "ale_c")]
extern "C" {
    fn ALE_new() -> *mut AleInterface;
    fn ALE_del(ale: *mut AleInterface);
    fn setInt(ale: *mut AleInterface, key: *const c_char, value: c_int);
    fn setFloat(ale: *mut AleInterface, key: *const c_char, value: c_float);
    fn loadROM(ale: *mut AleInterface, rom_file: *const c_char);
    fn act(ale: *mut AleInterface, action: c_int) -> c_int;
    fn game_over(ale: *mut AleInterface) -> bool;
    fn reset_game(ale: *mut AleInterface);
    fn lives(ale: *mut AleInterface) -> c_int;
    fn getMinimalActionSize(ale: *mut AleInterface) -> c_int;
    fn getMinimalActionSet(ale: *mut AleInterface, actions: *mut c_int);
    fn getScreenWidth(ale: *mut AleInterface) -> c_int;
    fn getScreenHeight(ale: *mut AleInterface) -> c_int;
    fn getScreenGrayscale(ale: *mut AleInterface, output_buffer: *mut c_uchar);
    fn getRAMSize(ale: *mut AleInterface) -> c_int;
    fn getRAM(ale: *mut AleInterface, ram: *mut c_uchar);
}

/// One native emulator instance with a loaded ROM
pub struct Ale {
    ptr: *mut AleInterface,
    width: usize,
    height: usize,
}

impl Ale {
    /// Creates the emulator and loads `rom`.
    ///
    /// The native library aborts on an invalid ROM, so the file is checked for readability up front.
    pub fn load(
        rom: &Path,
        config: &EmulatorConfig,
    ) -> Result<Self> {
        File::open(rom).with_context(|| format!("unable to read ROM file {}", rom.display()))?;
        let rom_file = CString::new(rom.to_str().ok_or_else(|| AleError::from("ROM path is not valid UTF-8"))?)?;

        let ptr = unsafe { ALE_new() };
        if ptr.is_null() {
            return Err(AleError::from("ALE_new returned no instance"))?;
        }
        let mut ale = Ale { ptr, width: 0, height: 0 };
        ale.set_int("random_seed", config.random_seed)?;
        ale.set_int("frame_skip", 1)?;
        ale.set_int("max_num_frames_per_episode", config.max_num_frames_per_episode)?;
        ale.set_float("repeat_action_probability", 0.0)?;
        unsafe { loadROM(ale.ptr, rom_file.as_ptr()) };

        ale.width = usize::try_from(unsafe { getScreenWidth(ale.ptr) })?;
        ale.height = usize::try_from(unsafe { getScreenHeight(ale.ptr) })?;
        log::debug!("loaded ROM {} ({}x{})", rom.display(), ale.width, ale.height);
        Ok(ale)
    }

    fn set_int(
        &mut self,
        key: &str,
        value: i32,
    ) -> Result<()> {
        let key = CString::new(key)?;
        unsafe { setInt(self.ptr, key.as_ptr(), value) };
        Ok(())
    }

    fn set_float(
        &mut self,
        key: &str,
        value: f32,
    ) -> Result<()> {
        let key = CString::new(key)?;
        unsafe { setFloat(self.ptr, key.as_ptr(), value) };
        Ok(())
    }
}

impl Emulator for Ale {
    fn act(
        &mut self,
        action: AtariAction,
    ) -> i32 {
        unsafe { act(self.ptr, action.id()) }
    }

    fn game_over(&self) -> bool { unsafe { game_over(self.ptr) } }

    fn reset_game(&mut self) { unsafe { reset_game(self.ptr) } }

    fn lives(&self) -> i32 { unsafe { lives(self.ptr) } }

    fn minimal_action_set(&self) -> Vec<AtariAction> {
        let size = usize::try_from(unsafe { getMinimalActionSize(self.ptr) }).unwrap_or(0);
        let mut ids = vec![0 as c_int; size];
        unsafe { getMinimalActionSet(self.ptr, ids.as_mut_ptr()) };
        // the emulator only reports ids of its own action enumeration
        ids.into_iter().filter_map(|id| AtariAction::try_from_id(id).ok()).collect()
    }

    fn screen_dims(&self) -> (usize, usize) { (self.width, self.height) }

    fn screen_grayscale(
        &self,
        buffer: &mut [u8],
    ) {
        assert_eq!(buffer.len(), self.width * self.height);
        unsafe { getScreenGrayscale(self.ptr, buffer.as_mut_ptr()) }
    }

    fn ram_size(&self) -> usize { usize::try_from(unsafe { getRAMSize(self.ptr) }).unwrap_or(0) }

    fn ram(
        &self,
        buffer: &mut [u8],
    ) {
        assert_eq!(buffer.len(), self.ram_size());
        unsafe { getRAM(self.ptr, buffer.as_mut_ptr()) }
    }
}

impl Drop for Ale {
    fn drop(&mut self) { unsafe { ALE_del(self.ptr) } }
}
