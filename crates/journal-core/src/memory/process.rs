//! Process-backed memory readers.
//!
//! Two backends implement [`ReadMemory`]:
//!
//! - [`CurrentProcess`], the plugin case: the library lives inside the host
//!   game executable and reads its own address space through raw pointers.
//! - [`ProcessHandle`] + [`MemoryReader`], the diagnostic case: attach to a
//!   running game from outside and read through `ReadProcessMemory`.
//!
//! Both resolve the game module base once at construction; relocation chains
//! start from that base on every resolution.
//!
//! Only the Windows backends are real. On other platforms the constructors
//! return [`Error::Unsupported`] so the rest of the crate (and its tests)
//! stays portable.

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// An opened handle to another process.
#[derive(Debug)]
pub struct ProcessHandle {
    pub pid: u32,
    pub base_address: u64,
    #[cfg(target_os = "windows")]
    handle: windows::Win32::Foundation::HANDLE,
}

/// [`ReadMemory`] over an opened [`ProcessHandle`].
pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }
}

/// The in-plugin backend: reads the address space this library is loaded in.
///
/// This is the narrow unsafe boundary of the crate. Addresses come from
/// relocation chains over externally supplied offsets; a zero link is caught
/// before any dereference, but a non-zero stale pointer is read as-is and can
/// fault if the host's layout assumptions are violated. That residual risk is
/// accepted: the host process is cooperative and its layout is stable between
/// frames.
#[derive(Debug, Clone, Copy)]
pub struct CurrentProcess {
    base: u64,
}

#[cfg(target_os = "windows")]
mod imp {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;
    use windows::Win32::System::Diagnostics::ToolHelp::{
        CreateToolhelp32Snapshot, MODULEENTRY32W, Module32FirstW, PROCESSENTRY32W,
        Process32FirstW, Process32NextW, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32,
        TH32CS_SNAPPROCESS,
    };
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::System::Threading::{
        OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
    };

    use super::*;

    impl ProcessHandle {
        /// Find a process by executable name and open it for reading.
        pub fn find_and_open(process_name: &str) -> Result<Self> {
            let pid = find_pid(process_name)?;
            Self::open(pid)
        }

        /// Open a process by id and resolve its main module base.
        pub fn open(pid: u32) -> Result<Self> {
            let handle =
                unsafe { OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid) }
                    .map_err(|e| Error::ProcessOpenFailed(format!("pid {pid}: {e}")))?;

            let base_address = match main_module_base(pid) {
                Ok(base) => base,
                Err(e) => {
                    unsafe {
                        let _ = CloseHandle(handle);
                    }
                    return Err(e);
                }
            };

            Ok(Self {
                pid,
                base_address,
                handle,
            })
        }
    }

    impl Drop for ProcessHandle {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.handle);
            }
        }
    }

    fn find_pid(process_name: &str) -> Result<u32> {
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) }
            .map_err(|e| Error::ProcessNotFound(format!("{process_name}: {e}")))?;

        let mut entry = PROCESSENTRY32W {
            dwSize: std::mem::size_of::<PROCESSENTRY32W>() as u32,
            ..Default::default()
        };

        let mut found = None;
        if unsafe { Process32FirstW(snapshot, &mut entry) }.is_ok() {
            loop {
                let len = entry
                    .szExeFile
                    .iter()
                    .position(|&c| c == 0)
                    .unwrap_or(entry.szExeFile.len());
                let name = String::from_utf16_lossy(&entry.szExeFile[..len]);
                if name.eq_ignore_ascii_case(process_name) {
                    found = Some(entry.th32ProcessID);
                    break;
                }
                if unsafe { Process32NextW(snapshot, &mut entry) }.is_err() {
                    break;
                }
            }
        }

        unsafe {
            let _ = CloseHandle(snapshot);
        }

        found.ok_or_else(|| Error::ProcessNotFound(process_name.to_string()))
    }

    fn main_module_base(pid: u32) -> Result<u64> {
        let snapshot =
            unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid) }
                .map_err(|e| Error::ProcessOpenFailed(format!("module snapshot: {e}")))?;

        let mut entry = MODULEENTRY32W {
            dwSize: std::mem::size_of::<MODULEENTRY32W>() as u32,
            ..Default::default()
        };

        // The first module of a snapshot is the executable itself.
        let result = unsafe { Module32FirstW(snapshot, &mut entry) }
            .map(|_| entry.modBaseAddr as u64)
            .map_err(|e| Error::ProcessOpenFailed(format!("module base: {e}")));

        unsafe {
            let _ = CloseHandle(snapshot);
        }

        result
    }

    impl ReadMemory for MemoryReader<'_> {
        fn base_address(&self) -> u64 {
            self.process.base_address
        }

        fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
            let mut buffer = vec![0u8; size];
            let mut bytes_read = 0usize;

            unsafe {
                ReadProcessMemory(
                    self.process.handle,
                    address as *const core::ffi::c_void,
                    buffer.as_mut_ptr() as *mut core::ffi::c_void,
                    size,
                    Some(&mut bytes_read),
                )
            }
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;

            buffer.truncate(bytes_read);
            Ok(buffer)
        }
    }

    impl CurrentProcess {
        /// Resolve the base of the executable this library is loaded into.
        pub fn new() -> Result<Self> {
            let module = unsafe { GetModuleHandleW(None) }
                .map_err(|e| Error::ProcessOpenFailed(format!("own module: {e}")))?;
            Ok(Self {
                base: module.0 as u64,
            })
        }
    }

    impl ReadMemory for CurrentProcess {
        fn base_address(&self) -> u64 {
            self.base
        }

        fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
            if address == 0 {
                return Err(Error::MemoryReadFailed {
                    address,
                    message: "null address".to_string(),
                });
            }
            // SAFETY: addresses reach this point only through relocation
            // chains whose links were non-null at walk time. A stale pointer
            // can still fault here; see the type-level doc.
            let slice = unsafe { std::slice::from_raw_parts(address as *const u8, size) };
            Ok(slice.to_vec())
        }
    }
}

#[cfg(not(target_os = "windows"))]
mod imp {
    use super::*;

    impl ProcessHandle {
        pub fn find_and_open(process_name: &str) -> Result<Self> {
            let _ = process_name;
            Err(Error::Unsupported(
                "process attach is only available on Windows".to_string(),
            ))
        }

        pub fn open(pid: u32) -> Result<Self> {
            let _ = pid;
            Err(Error::Unsupported(
                "process attach is only available on Windows".to_string(),
            ))
        }
    }

    impl ReadMemory for MemoryReader<'_> {
        fn base_address(&self) -> u64 {
            self.process.base_address
        }

        fn read_bytes(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
            Err(Error::MemoryReadFailed {
                address,
                message: "process memory is only readable on Windows".to_string(),
            })
        }
    }

    impl CurrentProcess {
        pub fn new() -> Result<Self> {
            Err(Error::Unsupported(
                "in-process reads are only available on Windows".to_string(),
            ))
        }
    }

    impl ReadMemory for CurrentProcess {
        fn base_address(&self) -> u64 {
            self.base
        }

        fn read_bytes(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
            Err(Error::MemoryReadFailed {
                address,
                message: "in-process reads are only available on Windows".to_string(),
            })
        }
    }
}
