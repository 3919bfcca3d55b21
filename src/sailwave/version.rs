//! Sailwave minimum-version gate.
//!
//! WM_COPYDATA roster replies need Sailwave 2.28.11 or newer. The check is
//! injectable so the live provider never reads process-wide state itself;
//! tests substitute their own gate, Windows builds use the registry probe.

/// Minimum Sailwave version with the WM_COPYDATA competitor interface.
pub const MIN_VERSION: &str = "2.28.11";

/// Normalized form of [`MIN_VERSION`] used for the string comparison.
const MIN_VERSION_KEY: &str = "0002.0028.0011";

/// Capability check for the live provider: pass, or fail with a diagnostic.
pub type VersionGate = Box<dyn Fn() -> Result<(), String> + Send>;

/// Whether a dotted version string satisfies [`MIN_VERSION`].
///
/// Each of the first three components is zero-padded to four digits and the
/// result compared lexically, so "10.0.0" correctly beats "2.28.11".
/// Malformed strings fail the gate.
pub fn version_ok(found: &str) -> bool {
    normalize(found).is_some_and(|key| key.as_str() >= MIN_VERSION_KEY)
}

fn normalize(version: &str) -> Option<String> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    let patch = parts.next()?;
    if [major, minor, patch].iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    Some(format!("{major:0>4}.{minor:0>4}.{patch:0>4}"))
}

/// Version gate backed by the Sailwave registry key.
#[cfg(windows)]
pub fn registry_gate() -> VersionGate {
    Box::new(|| match installed_version() {
        Some(found) if version_ok(&found) => Ok(()),
        Some(found) => Err(format!(
            "Incorrect Sailwave version {found} found. Version {MIN_VERSION} or greater is needed"
        )),
        None => {
            Err(format!("Sailwave not found. Version {MIN_VERSION} or greater is needed"))
        }
    })
}

/// First value under `HKCU\Software\Sailwave\Version`, if present.
#[cfg(windows)]
fn installed_version() -> Option<String> {
    use windows::Win32::Foundation::ERROR_SUCCESS;
    use windows::Win32::System::Registry::{
        HKEY, HKEY_CURRENT_USER, KEY_READ, RegCloseKey, RegEnumValueW, RegOpenKeyExW,
    };
    use windows::core::{PWSTR, w};

    unsafe {
        let mut hkey = HKEY::default();
        let status = RegOpenKeyExW(
            HKEY_CURRENT_USER,
            w!("Software\\Sailwave\\Version"),
            Some(0),
            KEY_READ,
            &mut hkey,
        );
        if status != ERROR_SUCCESS {
            return None;
        }

        let mut name = [0u16; 256];
        let mut name_len = name.len() as u32;
        let mut data = [0u8; 256];
        let mut data_len = data.len() as u32;
        let status = RegEnumValueW(
            hkey,
            0,
            Some(PWSTR(name.as_mut_ptr())),
            &mut name_len,
            None,
            None,
            Some(data.as_mut_ptr()),
            Some(&mut data_len),
        );
        let _ = RegCloseKey(hkey);
        if status != ERROR_SUCCESS {
            return None;
        }

        // REG_SZ payload is little-endian UTF-16 with a trailing NUL.
        let wide: Vec<u16> = data[..data_len as usize]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        Some(String::from_utf16_lossy(&wide).trim_end_matches('\0').to_string())
    }
}
