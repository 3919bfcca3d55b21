//! WM_COPYDATA connection to a running Sailwave instance.

use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::DataExchange::COPYDATASTRUCT;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Shell::ShellExecuteW;
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, DestroyWindow, DispatchMessageW, FindWindowExW, HWND_MESSAGE, MSG, PM_REMOVE,
    PeekMessageW, RegisterClassW, SW_MINIMIZE, SW_RESTORE, SW_SHOWNORMAL, SendMessageW,
    ShowWindow, TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_COPYDATA, WNDCLASSW,
    CreateWindowExW,
};
use windows::core::PCWSTR;

use crate::error::{Result, SheetError};
use crate::providers::live::poll_until;

/// Sailwave WM_COPYDATA message codes.
const MSG_ATTACH: usize = 1;
const MSG_REQUEST_ROSTER: usize = 7;
const MSG_CLOSE: usize = 32;

/// Listener window class name.
const CLASS_NAME: &str = "ScoringSheetLiveWC";

/// Budget for a freshly launched Sailwave to open its main window.
const LAUNCH_ATTEMPTS: u32 = 150;
const LAUNCH_POLL: Duration = Duration::from_millis(100);

thread_local! {
    /// Mailbox filled by the window procedure when a reply arrives.
    /// Single-threaded by design; the wndproc runs on the thread that
    /// created the listener window and pumps its messages.
    static REPLY: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// An attached Sailwave session.
///
/// Owns the message-only listener window and the target Sailwave window
/// handle. [`Connection::close`] restores the Sailwave window and, when the
/// tool launched the instance itself, tells it to quit without saving.
pub struct Connection {
    our_hwnd: HWND,
    sw_hwnd: HWND,
    needs_close: bool,
    closed: bool,
}

impl Connection {
    /// Attach to (or launch) Sailwave with `path` open and complete the
    /// attach handshake.
    ///
    /// An instance that already has the file open is only reused when
    /// `attach_running` is set; otherwise this fails without touching the
    /// running app.
    pub fn open(path: &Path, attach_running: bool) -> Result<Self> {
        let full_path = std::path::absolute(path)
            .map_err(|e| SheetError::file_error(path.to_path_buf(), e))?;
        let title = format!("Sailwave - {}", full_path.display());

        let our_hwnd = create_listener_window()?;

        let (sw_hwnd, needs_close) = match find_window_by_title(&title) {
            Some(hwnd) if attach_running => {
                info!("attaching to running Sailwave");
                (hwnd, false)
            }
            Some(_) => {
                let _ = unsafe { DestroyWindow(our_hwnd) };
                return Err(SheetError::connection_failed(format!(
                    "The file \"{}\" is open already. Close it and try again.",
                    path.display()
                )));
            }
            None => {
                info!(path = %full_path.display(), "launching Sailwave");
                match launch_and_wait(&full_path, &title) {
                    Ok(hwnd) => (hwnd, true),
                    Err(e) => {
                        let _ = unsafe { DestroyWindow(our_hwnd) };
                        return Err(e);
                    }
                }
            }
        };

        // Keep the app out of the operator's way while we talk to it.
        let _ = unsafe { ShowWindow(sw_hwnd, SW_MINIMIZE) };

        let mut connection = Self { our_hwnd, sw_hwnd, needs_close, closed: false };

        // Tell Sailwave which window receives replies: our handle as
        // ASCII decimal, NUL terminated.
        let mut handle_bytes = format!("{}", our_hwnd.0 as usize).into_bytes();
        handle_bytes.push(0);
        connection.send_code(MSG_ATTACH, &handle_bytes);
        std::thread::sleep(Duration::from_millis(100));
        pump_messages();

        Ok(connection)
    }

    /// Request the competitor list and wait for the reply, polling up to
    /// `attempts` times at `interval`.
    pub fn request_roster(&mut self, attempts: u32, interval: Duration) -> Result<String> {
        let _ = take_reply();
        self.send_code(MSG_REQUEST_ROSTER, &[]);
        debug!(attempts, ?interval, "waiting for Sailwave roster reply");
        poll_until(attempts, interval, || {
            pump_messages();
            take_reply()
        })
    }

    /// Restore the Sailwave window and, if this tool launched the instance,
    /// tell it to close without saving. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let _ = unsafe { ShowWindow(self.sw_hwnd, SW_RESTORE) };
        std::thread::sleep(Duration::from_millis(100));

        if self.needs_close {
            debug!("closing launched Sailwave instance");
            self.send_code(MSG_CLOSE, &[]);
            std::thread::sleep(Duration::from_millis(100));
        }
        pump_messages();

        let _ = unsafe { DestroyWindow(self.our_hwnd) };
        self.sw_hwnd = HWND::default();
        self.our_hwnd = HWND::default();
    }

    fn send_code(&self, code: usize, data: &[u8]) {
        let cds = COPYDATASTRUCT {
            dwData: code,
            cbData: data.len() as u32,
            lpData: if data.is_empty() {
                std::ptr::null_mut()
            } else {
                data.as_ptr() as *mut std::ffi::c_void
            },
        };
        unsafe {
            SendMessageW(
                self.sw_hwnd,
                WM_COPYDATA,
                Some(WPARAM(self.our_hwnd.0 as usize)),
                Some(LPARAM(&cds as *const COPYDATASTRUCT as isize)),
            );
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Create the HWND_MESSAGE listener window that receives replies.
fn create_listener_window() -> Result<HWND> {
    let class_name = wide(CLASS_NAME);
    unsafe {
        let hinstance = GetModuleHandleW(None)
            .map_err(|e| SheetError::windows_api_error("GetModuleHandleW", e))?;

        let wc = WNDCLASSW {
            lpfnWndProc: Some(wndproc),
            hInstance: hinstance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        // Re-registering an already-registered class fails; that only
        // happens within one process and reuses the same wndproc, so the
        // atom result is only checked for the first registration.
        let _ = RegisterClassW(&wc);

        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            PCWSTR(class_name.as_ptr()),
            PCWSTR::null(),
            WINDOW_STYLE(0),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            Some(hinstance.into()),
            None,
        )
        .map_err(|e| SheetError::windows_api_error("CreateWindowExW", e))
    }
}

/// Launch Sailwave on `path` and poll for its main window.
fn launch_and_wait(full_path: &Path, title: &str) -> Result<HWND> {
    let path_wide = wide(&full_path.display().to_string());
    let verb = wide("open");
    let instance = unsafe {
        ShellExecuteW(
            None,
            PCWSTR(verb.as_ptr()),
            PCWSTR(path_wide.as_ptr()),
            None,
            None,
            SW_SHOWNORMAL,
        )
    };
    // ShellExecuteW reports failure through values <= 32.
    if (instance.0 as isize) <= 32 {
        return Err(SheetError::connection_failed(format!(
            "Failed to launch Sailwave for \"{}\"",
            full_path.display()
        )));
    }

    poll_until(LAUNCH_ATTEMPTS, LAUNCH_POLL, || find_window_by_title(title)).map_err(|_| {
        SheetError::connection_failed("Timed out waiting for Sailwave to launch")
    })
}

fn find_window_by_title(title: &str) -> Option<HWND> {
    let title_wide = wide(title);
    unsafe {
        FindWindowExW(None, None, PCWSTR::null(), PCWSTR(title_wide.as_ptr()))
            .ok()
            .filter(|hwnd| !hwnd.is_invalid())
    }
}

/// Drain the thread's message queue so WM_COPYDATA replies reach `wndproc`.
fn pump_messages() {
    unsafe {
        let mut msg = MSG::default();
        while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

fn take_reply() -> Option<String> {
    REPLY.with(|slot| slot.borrow_mut().take())
}

/// Sailwave replies are Latin-1 with CR row separators; normalize to `\n`.
fn decode_reply(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| if b == b'\r' { '\n' } else { char::from(b) }).collect()
}

unsafe extern "system" fn wndproc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_COPYDATA {
        let cds = unsafe { &*(lparam.0 as *const COPYDATASTRUCT) };
        let bytes = if cds.lpData.is_null() || cds.cbData == 0 {
            &[][..]
        } else {
            unsafe { std::slice::from_raw_parts(cds.lpData as *const u8, cds.cbData as usize) }
        };
        let text = decode_reply(bytes);
        debug!(code = cds.dwData, bytes = bytes.len(), "received WM_COPYDATA reply");
        REPLY.with(|slot| *slot.borrow_mut() = Some(text));
        return LRESULT(1);
    }
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
