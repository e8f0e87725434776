use crate::{error::Result, protocols::Transport, scpi::Value};

use super::{commands::display as cmd, enums::WindowLayout};

view!(Display);
view!(Color);
view!(Window);
view!(WindowTrace);

impl<'a, T: Transport> Display<'a, T> {
    pub fn color(self) -> Color<'a, T> {
        Color::new(self.session)
    }
    pub fn window(self) -> Window<'a, T> {
        Window::new(self.session)
    }

    /// Whether the screen is updated.
    pub fn enable(&mut self) -> Result<bool> {
        self.session.get(&cmd::ENABLE)
    }
    pub fn set_enable(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::ENABLE, on)
    }
    /// Whether a failed limit test is flagged on screen.
    pub fn fail_sign(&mut self) -> Result<bool> {
        self.session.get(&cmd::FAIL_SIGN)
    }
    pub fn set_fail_sign(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::FAIL_SIGN, on)
    }
}

fn rgb(red: u8, green: u8, blue: u8) -> [Value; 3] {
    [red, green, blue].map(|c| Value::from(u32::from(c)))
}

impl<'a, T: Transport> Color<'a, T> {
    /// Restores the default color scheme.
    pub fn reset(&mut self) -> Result<()> {
        self.session.fire(&cmd::COLOR_RESET, &[])
    }
    pub fn set_trace_data(&mut self, red: u8, green: u8, blue: u8) -> Result<()> {
        self.session.fire(&cmd::COLOR_TRACE_DATA, &rgb(red, green, blue))
    }
    pub fn set_trace_memory(&mut self, red: u8, green: u8, blue: u8) -> Result<()> {
        self.session.fire(&cmd::COLOR_TRACE_MEMORY, &rgb(red, green, blue))
    }
}

/// Window of the context channel.
impl<'a, T: Transport> Window<'a, T> {
    pub fn trace(self) -> WindowTrace<'a, T> {
        WindowTrace::new(self.session)
    }

    pub fn layout(&mut self) -> Result<WindowLayout> {
        self.session.get(&cmd::WINDOW_LAYOUT)
    }
    pub fn set_layout(&mut self, layout: WindowLayout) -> Result<()> {
        self.session.set(&cmd::WINDOW_LAYOUT, layout)
    }
    pub fn maximize(&mut self) -> Result<bool> {
        self.session.get(&cmd::WINDOW_MAXIMIZE)
    }
    pub fn set_maximize(&mut self, on: bool) -> Result<()> {
        self.session.set(&cmd::WINDOW_MAXIMIZE, on)
    }
}

impl<'a, T: Transport> WindowTrace<'a, T> {
    /// Fits the Y scale of the context trace to its data once.
    pub fn autoscale(&mut self) -> Result<()> {
        self.session.fire(&cmd::Y_AUTOSCALE, &[])
    }
    pub fn y_per_division(&mut self) -> Result<f64> {
        self.session.get(&cmd::Y_PER_DIVISION)
    }
    pub fn set_y_per_division(&mut self, value: f64) -> Result<()> {
        self.session.set(&cmd::Y_PER_DIVISION, value)
    }
}
