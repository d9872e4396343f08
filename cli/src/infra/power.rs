//! Power-state notification subscription.
//!
//! `PowerEvents` owns a platform listener that forwards OS suspend/resume
//! notifications into an in-process channel. Dropping the value unsubscribes
//! the listener, so a shut-down monitor can never be called back.
//!
//! Linux listens for logind's `PrepareForSleep` D-Bus signal; Windows runs a
//! hidden window on a dedicated thread and translates `WM_POWERBROADCAST`.

use tokio::sync::mpsc;

use crate::domain::power::PowerEvent;

/// A live subscription to OS power notifications.
pub struct PowerEvents {
    rx: mpsc::UnboundedReceiver<PowerEvent>,
    #[cfg(target_os = "linux")]
    listener: tokio::task::JoinHandle<()>,
    #[cfg(windows)]
    running: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

impl PowerEvents {
    /// Next power event, or `None` if the listener has gone away.
    pub async fn recv(&mut self) -> Option<PowerEvent> {
        self.rx.recv().await
    }
}

impl Drop for PowerEvents {
    fn drop(&mut self) {
        #[cfg(target_os = "linux")]
        self.listener.abort();
        #[cfg(windows)]
        self.running
            .store(false, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(target_os = "linux")]
impl PowerEvents {
    /// Subscribe to logind's sleep notifications on the system bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the system bus is unreachable or the signal
    /// cannot be subscribed.
    pub async fn subscribe() -> anyhow::Result<Self> {
        use anyhow::Context as _;
        use futures_util::StreamExt as _;

        let connection = zbus::Connection::system()
            .await
            .context("connecting to the system D-Bus")?;
        let manager = login1::ManagerProxy::new(&connection)
            .await
            .context("binding the logind manager")?;
        let mut stream = manager
            .receive_prepare_for_sleep()
            .await
            .context("subscribing to PrepareForSleep")?;

        let (tx, rx) = mpsc::unbounded_channel();
        let listener = tokio::spawn(async move {
            while let Some(signal) = stream.next().await {
                let Ok(args) = signal.args() else { continue };
                // start=true fires before the sleep, start=false after waking.
                let event = if args.start {
                    PowerEvent::Suspend
                } else {
                    PowerEvent::Resume
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Ok(Self { rx, listener })
    }
}

#[cfg(target_os = "linux")]
mod login1 {
    //! Minimal logind proxy: only the sleep signal is needed.

    use zbus::proxy;

    #[proxy(
        interface = "org.freedesktop.login1.Manager",
        default_service = "org.freedesktop.login1",
        default_path = "/org/freedesktop/login1",
        gen_blocking = false
    )]
    pub trait Manager {
        /// Emitted with `start = true` right before sleeping and
        /// `start = false` right after waking.
        #[zbus(signal)]
        fn prepare_for_sleep(&self, start: bool) -> zbus::Result<()>;
    }
}

#[cfg(windows)]
impl PowerEvents {
    /// Subscribe by spinning up the hidden power-broadcast window.
    ///
    /// # Errors
    ///
    /// Returns an error if the pump thread cannot be spawned.
    pub async fn subscribe() -> anyhow::Result<Self> {
        use std::sync::Arc;
        use std::sync::atomic::AtomicBool;

        use anyhow::Context as _;

        let (tx, rx) = mpsc::unbounded_channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        std::thread::Builder::new()
            .name("power-events".into())
            .spawn(move || pump::run(&tx, &flag))
            .context("spawning the power message pump")?;
        Ok(Self { rx, running })
    }
}

#[cfg(windows)]
mod pump {
    //! Hidden-window message pump translating `WM_POWERBROADCAST`.
    //!
    //! Raw Win32 window plumbing; the one place the workspace-wide unsafe
    //! ban is lifted.
    #![allow(unsafe_code)]

    use std::cell::Cell;
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use std::sync::atomic::{AtomicBool, Ordering};

    use tokio::sync::mpsc::UnboundedSender;
    use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::{
        CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DestroyWindow,
        DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, RegisterClassW,
        TranslateMessage, WM_DESTROY, WM_POWERBROADCAST, WNDCLASSW, WS_OVERLAPPEDWINDOW,
    };
    use windows::core::PCWSTR;

    use crate::domain::power::PowerEvent;

    const PBT_APMSUSPEND: u32 = 0x0004;
    const PBT_APMRESUMESUSPEND: u32 = 0x0007;
    const PBT_APMPOWERSTATUSCHANGE: u32 = 0x000A;
    const PBT_APMRESUMEAUTOMATIC: u32 = 0x0012;

    // The window proc has no user-data argument, so the sender is parked in
    // a thread-local for the lifetime of the pump loop below.
    thread_local! {
        static SENDER: Cell<*const UnboundedSender<PowerEvent>> =
            const { Cell::new(std::ptr::null()) };
    }

    fn to_wide(s: &str) -> Vec<u16> {
        OsStr::new(s)
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    }

    fn forward(event: PowerEvent) {
        SENDER.with(|cell| {
            let ptr = cell.get();
            if !ptr.is_null() {
                let tx = unsafe { &*ptr };
                let _ = tx.send(event);
            }
        });
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_POWERBROADCAST => {
                #[allow(clippy::cast_possible_truncation)]
                match wparam.0 as u32 {
                    PBT_APMSUSPEND => forward(PowerEvent::Suspend),
                    PBT_APMRESUMESUSPEND | PBT_APMRESUMEAUTOMATIC => {
                        forward(PowerEvent::Resume);
                    }
                    PBT_APMPOWERSTATUSCHANGE => forward(PowerEvent::StatusChange),
                    _ => {}
                }
                LRESULT(1) // TRUE: broadcast accepted
            }
            WM_DESTROY => LRESULT(0),
            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }

    pub(super) fn run(tx: &UnboundedSender<PowerEvent>, running: &AtomicBool) {
        SENDER.with(|cell| cell.set(std::ptr::from_ref(tx)));

        unsafe {
            let class_name = to_wide("DormousePowerWindow");
            let Ok(hinstance) = GetModuleHandleW(None) else {
                return;
            };

            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wnd_proc),
                hInstance: hinstance.into(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                ..Default::default()
            };
            RegisterClassW(&wc);

            let Ok(hwnd) = CreateWindowExW(
                Default::default(),
                PCWSTR(class_name.as_ptr()),
                PCWSTR::null(),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                None,
                None,
                HINSTANCE(hinstance.0),
                None,
            ) else {
                SENDER.with(|cell| cell.set(std::ptr::null()));
                return;
            };

            let mut msg = MSG::default();
            while running.load(Ordering::SeqCst) {
                // PeekMessage keeps the loop responsive to the running flag;
                // GetMessage alone would block past shutdown.
                if PeekMessageW(&mut msg, hwnd, 0, 0, PM_NOREMOVE).as_bool() {
                    if !GetMessageW(&mut msg, hwnd, 0, 0).as_bool() {
                        break;
                    }
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                } else {
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }

            let _ = DestroyWindow(hwnd);
        }

        SENDER.with(|cell| cell.set(std::ptr::null()));
    }
}

#[cfg(not(any(target_os = "linux", windows)))]
impl PowerEvents {
    /// Power notifications are not wired up on this platform.
    ///
    /// # Errors
    ///
    /// Always.
    pub async fn subscribe() -> anyhow::Result<Self> {
        anyhow::bail!("power-event monitoring is not supported on this platform")
    }
}
