//! WSL distro enumeration.
//!
//! WSL registers every distro under
//! `HKCU\Software\Microsoft\Windows\CurrentVersion\Lxss`; the vhdx backing
//! its root filesystem lives at `<BasePath>\ext4.vhdx`.

use anyhow::Result;
use std::path::PathBuf;

#[cfg(windows)]
pub fn enumerate() -> Result<Vec<(String, PathBuf)>> {
    use anyhow::Context;
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    let lxss = RegKey::predef(HKEY_CURRENT_USER)
        .open_subkey("Software\\Microsoft\\Windows\\CurrentVersion\\Lxss")
        .context("opening the Lxss registry key (is WSL installed?)")?;

    let mut distros = Vec::new();
    for subkey in lxss.enum_keys() {
        let subkey = subkey.context("enumerating Lxss subkeys")?;
        let distro = lxss
            .open_subkey(&subkey)
            .with_context(|| format!("opening Lxss\\{subkey}"))?;
        let name: String = distro
            .get_value("DistributionName")
            .with_context(|| format!("reading DistributionName of {subkey}"))?;
        let base: String = distro
            .get_value("BasePath")
            .with_context(|| format!("reading BasePath of {name}"))?;
        distros.push((name, PathBuf::from(base).join("ext4.vhdx")));
    }
    Ok(distros)
}

#[cfg(not(windows))]
pub fn enumerate() -> Result<Vec<(String, PathBuf)>> {
    anyhow::bail!("WSL distro enumeration reads the Windows registry; this host is not Windows")
}
