// What the frame loop does when the swapchain refuses a frame.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceRecovery {
    /// Configure the surface again and try next frame.
    Reconfigure,
    /// Drop this frame only.
    SkipFrame,
}

pub fn surface_recovery(err: &wgpu::SurfaceError) -> SurfaceRecovery {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
        _ => SurfaceRecovery::SkipFrame,
    }
}
