use vitrine_perf::AnimationKind;
use yew::prelude::*;

use crate::a11y::{STATUS_REGION_ID, visible_focus_css};
use crate::components::motion_gate::MotionGate;
use crate::components::performance_indicator::PerformanceIndicator;
use crate::probe::ProbeHandle;
use crate::provider::PerformanceProvider;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub probe: ProbeHandle,
    #[prop_or(true)]
    pub sample_frames: bool,
}

#[function_component(App)]
pub fn app(p: &Props) -> Html {
    html! {
      <PerformanceProvider probe={p.probe.clone()} sample_frames={p.sample_frames}>
        <style>{ visible_focus_css() }</style>
        <a class="sr-only" href="#main">{ "Skip to content" }</a>
        <main id="main">
          <MotionGate kind={AnimationKind::Particles} class="hero-backdrop">
            <div class="particles" aria-hidden="true"></div>
          </MotionGate>
          <MotionGate kind={AnimationKind::Basic} base_duration_ms={400.0}>
            <header class="hero">
              <h1>{ "Portfolio" }</h1>
            </header>
          </MotionGate>
          <MotionGate kind={AnimationKind::Complex} base_duration_ms={600.0}>
            <section id="projects" class="projects"></section>
          </MotionGate>
        </main>
        <PerformanceIndicator />
        <div id={STATUS_REGION_ID} class="sr-only" aria-live="polite"></div>
      </PerformanceProvider>
    }
}
