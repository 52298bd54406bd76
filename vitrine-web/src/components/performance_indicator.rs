use vitrine_perf::{AnimationQuality, DeviceScore, PolicyOverride, QualityTier};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::provider::{PerformanceHandle, use_performance};

const FRAME_RATE_MIN: u32 = 15;
const FRAME_RATE_MAX: u32 = 60;
const FRAME_RATE_STEP: u32 = 15;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub initially_open: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum SelfTest {
    Idle,
    Running,
    Done(DeviceScore),
    Failed,
}

fn override_callback<E, F>(perf: &PerformanceHandle, build: F) -> Callback<E>
where
    E: 'static,
    F: Fn(E) -> Option<PolicyOverride> + 'static,
{
    let perf = perf.clone();
    Callback::from(move |event: E| {
        if let Some(patch) = build(event) {
            perf.set_override(&patch);
        }
    })
}

/// Floating quality badge with an expandable settings panel.
#[function_component(PerformanceIndicator)]
pub fn performance_indicator(p: &Props) -> Html {
    let perf = use_performance();
    let open = use_state(|| p.initially_open);
    let self_test = use_state(|| SelfTest::Idle);

    let Some(perf) = perf else {
        return html! {};
    };
    let policy = perf.policy();
    let quality = AnimationQuality::evaluate(&policy);

    let toggle_open = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };

    let on_tier = override_callback(&perf, |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        PolicyOverride::parse_tier(&select.value())
            .map_err(|err| log::warn!("{err}"))
            .ok()
    });
    let on_animations = override_callback(&perf, |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Some(PolicyOverride::default().with_animations(input.checked()))
    });
    let on_particles = override_callback(&perf, |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Some(PolicyOverride::default().with_particles(input.checked()))
    });
    let on_blur = override_callback(&perf, |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Some(PolicyOverride::default().with_blur(input.checked()))
    });
    let on_frame_rate = override_callback(&perf, |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .value()
            .parse::<u32>()
            .ok()
            .map(|fps| PolicyOverride::default().with_frame_rate(fps))
    });
    let on_reset = {
        let perf = perf.clone();
        Callback::from(move |_| perf.reset_to_detected())
    };

    let on_self_test = {
        let self_test = self_test.clone();
        Callback::from(move |_| {
            if *self_test == SelfTest::Running {
                return;
            }
            self_test.set(SelfTest::Running);
            #[cfg(target_arch = "wasm32")]
            {
                let self_test = self_test.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match crate::self_test::run_self_test().await {
                        Ok(readings) => {
                            self_test.set(SelfTest::Done(DeviceScore::from_readings(&readings)));
                        }
                        Err(err) => {
                            log::warn!("self-test failed: {}", crate::dom::js_error_message(&err));
                            self_test.set(SelfTest::Failed);
                        }
                    }
                });
            }
        })
    };

    let self_test_view = match *self_test {
        SelfTest::Idle => html! {},
        SelfTest::Running => html! { <p class="perf-self-test__status">{ "Measuring…" }</p> },
        SelfTest::Done(score) => html! {
            <p class="perf-self-test__score">
                { format!("Device score: {}/100", score.total()) }
            </p>
        },
        SelfTest::Failed => {
            html! { <p class="perf-self-test__status">{ "Self-test unavailable" }</p> }
        }
    };

    let tier_options = QualityTier::ALL
        .into_iter()
        .map(|tier| {
            html! {
                <option value={tier.label()} selected={tier == policy.tier}>
                    { format!("{} {}", tier.glyph(), tier.label()) }
                </option>
            }
        })
        .collect::<Html>();

    let panel = if *open {
        html! {
          <div class="perf-panel" id="perf-panel" role="dialog" aria-labelledby="perf-panel-title">
            <h2 id="perf-panel-title">{ "Performance" }</h2>
            <div class="field">
              <label for="perf-tier">{ "Quality" }</label>
              <select id="perf-tier" key={policy.tier.label()} onchange={on_tier}>
                { tier_options }
              </select>
            </div>
            <div class="field">
              <label for="perf-animations">{ "Animations" }</label>
              <input id="perf-animations" type="checkbox"
                     checked={policy.animations_enabled}
                     disabled={policy.reduced_motion_requested}
                     onchange={on_animations} />
            </div>
            <div class="field">
              <label for="perf-particles">{ "Particles" }</label>
              <input id="perf-particles" type="checkbox"
                     checked={policy.particles_enabled}
                     disabled={policy.reduced_motion_requested || policy.tier == QualityTier::Low}
                     onchange={on_particles} />
            </div>
            <div class="field">
              <label for="perf-blur">{ "Blur effects" }</label>
              <input id="perf-blur" type="checkbox"
                     checked={policy.blur_enabled}
                     onchange={on_blur} />
            </div>
            <div class="field">
              <label for="perf-fps">{ format!("Target FPS: {}", policy.target_frame_rate) }</label>
              <input id="perf-fps" type="range"
                     min={FRAME_RATE_MIN.to_string()}
                     max={FRAME_RATE_MAX.to_string()}
                     step={FRAME_RATE_STEP.to_string()}
                     value={policy.target_frame_rate.to_string()}
                     oninput={on_frame_rate} />
            </div>
            <dl class="perf-summary">
              <dt>{ "Experience" }</dt><dd class="perf-quality">{ quality.label() }</dd>
              <dt>{ "Device" }</dt>
              <dd>{ if perf.is_mobile() { "Mobile" } else { "Desktop" } }</dd>
              if perf.is_low_end() {
                <dt>{ "Note" }</dt><dd>{ "Low-end device detected" }</dd>
              }
              if policy.reduced_motion_requested {
                <dt>{ "Motion" }</dt><dd>{ "Reduced motion requested" }</dd>
              }
            </dl>
            <div class="controls">
              <button id="perf-reset" onclick={on_reset}>{ "Reset to detected" }</button>
              <button id="perf-self-test" onclick={on_self_test}
                      disabled={*self_test == SelfTest::Running}>
                { "Run self-test" }
              </button>
            </div>
            { self_test_view }
          </div>
        }
    } else {
        html! {}
    };

    html! {
      <div class={classes!("perf-indicator", format!("perf-indicator--{}", policy.tier.label()))}>
        <button id="perf-toggle" class="perf-indicator__button"
                aria-expanded={(*open).to_string()}
                aria-controls="perf-panel"
                aria-label={format!("Performance settings, {} quality", policy.tier)}
                onclick={toggle_open}>
          <span aria-hidden="true">{ policy.tier.glyph() }</span>
          <span class="perf-indicator__badge">{ policy.tier.badge().to_string() }</span>
        </button>
        { panel }
      </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn renders_nothing_without_provider() {
        let html = block_on(
            LocalServerRenderer::<PerformanceIndicator>::with_props(Props {
                initially_open: true,
            })
            .render(),
        );
        assert!(!html.contains("perf-indicator"));
    }
}
