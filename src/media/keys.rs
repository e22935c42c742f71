//! OS-level play/pause key injection.
//!
//! On Windows this synthesizes a `VK_MEDIA_PLAY_PAUSE` press and release with
//! `SendInput`, which the shell routes to the active media session. The OS
//! gives no feedback about what the session did with it.

use tracing::debug;

use super::error::MediaError;
use super::MediaController;

/// Sends play/pause toggles to the system's active media session.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMediaController;

impl SystemMediaController {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MediaController for SystemMediaController {
    fn toggle_playback(&self) -> Result<(), MediaError> {
        send_play_pause()?;
        debug!("Media play/pause key sent");
        Ok(())
    }
}

#[cfg(windows)]
fn send_play_pause() -> Result<(), MediaError> {
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
        KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VK_MEDIA_PLAY_PAUSE,
    };

    fn key_input(flags: KEYBD_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VK_MEDIA_PLAY_PAUSE,
                    wScan: 0,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    let inputs = [
        key_input(KEYEVENTF_EXTENDEDKEY),
        key_input(KEYEVENTF_EXTENDEDKEY | KEYEVENTF_KEYUP),
    ];

    // SAFETY: `inputs` is a valid, initialized slice of keyboard INPUT records
    // and the size argument matches the element type.
    let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };

    if sent as usize != inputs.len() {
        return Err(MediaError::DispatchFailed(format!(
            "{} of {} key events delivered: {}",
            sent,
            inputs.len(),
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}

#[cfg(not(windows))]
fn send_play_pause() -> Result<(), MediaError> {
    Err(MediaError::Unsupported(std::env::consts::OS))
}
