//! Headless shadow demo
//!
//! Runs the frame loop of a cascaded-shadow-map renderer without a window:
//! the light moves, the shadow matrices are recomputed every frame and both
//! passes are recorded instead of submitted to a GPU.

use csm_engine::prelude::*;
use csm_engine::render::FrameInfo;

/// Frames between simulated presses of the debug key
const DEBUG_KEY_PERIOD: u32 = 180;

/// Counters collected over a run
#[derive(Debug, Default)]
pub struct RunStats {
    pub frames: u32,
    pub depth_draws: usize,
    pub lighting_draws: usize,
    pub depth_map_frames: u32,
    pub uniform_bytes: usize,
}

pub struct ShadowDemo {
    config: DemoConfig,
    // the scene refers into the pool, so it stays alive with the scene
    _meshes: MeshPool,
    scene: Scene,
    camera: Camera,
    context: FrameContext,
    planner: ShadowPlanner,
    depth_pass: RecordingBackend,
    lighting_pass: RecordingBackend,
}

impl ShadowDemo {
    pub fn new(config: DemoConfig) -> Result<Self, SceneError> {
        log::info!("Creating shadow demo...");
        let mut meshes = MeshPool::new();
        let scene = primitives::demo_scene(&mut meshes)?;

        let camera = Camera::from_config(&config.camera, Vec3::new(0.0, 0.0, 3.0), Vec3::zeros());
        log::info!(
            "Shadow technique {:?}, {}x{} tiles",
            config.shadows.technique,
            config.shadows.tile_size(),
            config.shadows.tile_size()
        );

        Ok(Self {
            context: FrameContext::from_config(&config),
            planner: ShadowPlanner::from_config(&config),
            config,
            _meshes: meshes,
            scene,
            camera,
            depth_pass: RecordingBackend::new(),
            lighting_pass: RecordingBackend::new(),
        })
    }

    pub fn run(&mut self) -> Result<RunStats, RenderError> {
        log::info!("Running {} frames...", self.config.frames);
        let mut stats = RunStats::default();

        for frame in 0..self.config.frames {
            let now = f64::from(frame) * self.config.fixed_timestep;
            let info = self.context.begin_frame(now);

            let pressed = frame > 0 && frame % DEBUG_KEY_PERIOD == 0;
            let view = self.context.update_debug_toggle(pressed);

            let shadow_frame = self.planner.plan(&self.scene, &self.camera, info.light_position);
            self.render_frame(&shadow_frame, view, &mut stats)?;

            if let Some(title) = &info.title {
                log::info!("{}", title);
                log_shadow_frame(&info, &shadow_frame);
            }
            stats.frames += 1;
        }

        Ok(stats)
    }

    fn render_frame(&mut self, shadow_frame: &ShadowFrame, view: DebugView, stats: &mut RunStats) -> Result<(), RenderError> {
        // 1. depth of the scene from the light, once per shadow map
        for _light_space in shadow_frame.depth_pass_matrices() {
            self.depth_pass.clear();
            self.scene.render(&mut self.depth_pass, |_, object, backend| {
                backend.set_model_matrix(object.transform());
            })?;
            stats.depth_draws += self.depth_pass.commands().len();
        }

        // 2. lit scene, or the depth map on a quad
        let uniforms = shadow_frame.uniforms();
        stats.uniform_bytes = uniforms.as_bytes().len();

        self.lighting_pass.clear();
        match view {
            DebugView::Scene => {
                self.scene.render(&mut self.lighting_pass, |_, object, backend| {
                    backend.set_model_matrix(object.transform());
                })?;
                stats.lighting_draws += self.lighting_pass.commands().len();
            }
            DebugView::DepthMap => {
                log::trace!(
                    "Showing depth map, light range [{:.3}, {:.3}]",
                    shadow_frame.light.near,
                    shadow_frame.light.far
                );
                stats.depth_map_frames += 1;
            }
        }
        Ok(())
    }
}

fn log_shadow_frame(info: &FrameInfo, shadow_frame: &ShadowFrame) {
    log::info!(
        "Frame {}: light at ({:.2}, {:.2}, {:.2}), camera clip [{:.3}, {:.3}]",
        info.frame,
        info.light_position.x,
        info.light_position.y,
        info.light_position.z,
        shadow_frame.clip.near,
        shadow_frame.clip.far
    );
    for (index, cascade) in shadow_frame.cascades.iter().enumerate() {
        log::debug!("  cascade {}: split depth {:.3}", index, cascade.split_depth);
    }
}
