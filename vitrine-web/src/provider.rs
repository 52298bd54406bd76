//! Context provider that owns the single governor instance for the page.
//!
//! Consumers pull: they read the policy whenever they render or start an
//! animation. User actions, reduced-motion flips and automatic downgrades also
//! schedule a re-render so the settings panel never shows a stale tier.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_perf::{
    AnimationKind, CapabilityProfile, Downgrade, GovernorConfig, OverrideReport,
    PerformanceGovernor, Policy, PolicyOverride, QualityTier,
};
use yew::prelude::*;

use crate::probe::ProbeHandle;

type SharedGovernor = Rc<RefCell<PerformanceGovernor<ProbeHandle>>>;

/// Governor tuning bundled with the page.
#[must_use]
pub fn load_governor_config() -> GovernorConfig {
    GovernorConfig::from_json_or_default(include_str!("../static/assets/data/governor.json"))
}

/// Cheap, cloneable view of the page's governor handed out through context.
#[derive(Clone)]
pub struct PerformanceHandle {
    governor: SharedGovernor,
    revision: u32,
    refresh: Callback<()>,
}

impl PartialEq for PerformanceHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.governor, &other.governor) && self.revision == other.revision
    }
}

impl PerformanceHandle {
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.governor.borrow().policy()
    }

    #[must_use]
    pub fn profile(&self) -> CapabilityProfile {
        self.governor.borrow().profile()
    }

    #[must_use]
    pub fn config(&self) -> GovernorConfig {
        self.governor.borrow().config().clone()
    }

    #[must_use]
    pub fn should_animate(&self, kind: AnimationKind) -> bool {
        self.governor.borrow().should_animate(kind)
    }

    #[must_use]
    pub fn animation_duration(&self, base_ms: f64) -> f64 {
        self.governor.borrow().animation_duration(base_ms)
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.governor.borrow().is_mobile()
    }

    #[must_use]
    pub fn is_low_end(&self) -> bool {
        self.governor.borrow().is_low_end()
    }

    /// Apply a user override and re-render subscribers.
    pub fn set_override(&self, patch: &PolicyOverride) -> OverrideReport {
        let report = self.governor.borrow_mut().set_override(patch);
        for rejected in &report.rejected {
            log::info!("override rejected: {rejected}");
        }
        self.refresh.emit(());
        report
    }

    pub fn reset_to_detected(&self) {
        self.governor.borrow_mut().reset_to_detected();
        self.refresh.emit(());
    }

    /// Revision counter bumped on every pushed change.
    #[must_use]
    pub const fn revision(&self) -> u32 {
        self.revision
    }
}

#[derive(Default, PartialEq)]
struct Revision(u32);

impl Reducible for Revision {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub probe: ProbeHandle,
    /// Drive the frame sampler from `requestAnimationFrame`.
    #[prop_or(true)]
    pub sample_frames: bool,
}

fn announce_downgrade(downgrade: &Downgrade) {
    crate::a11y::set_quality_class(downgrade.to);
    crate::a11y::set_status(&format!(
        "Visual quality lowered to {} to keep things smooth",
        downgrade.to
    ));
}

/// Feed one animation-frame timestamp and publish any resulting downgrade.
fn on_frame(governor: &SharedGovernor, refresh: &Callback<()>, timestamp: f64) {
    let downgrade = governor.borrow_mut().on_frame_timestamp(timestamp);
    if let Some(downgrade) = downgrade {
        announce_downgrade(&downgrade);
        refresh.emit(());
    }
}

fn start_sampling(
    governor: SharedGovernor,
    refresh: Callback<()>,
) -> Option<crate::frame_loop::FrameLoop> {
    let Some(win) = crate::frame_loop::probe_frame_timing().into_option() else {
        log::debug!("requestAnimationFrame unavailable; keeping the detected tier");
        return None;
    };
    let started = crate::frame_loop::FrameLoop::start(win, move |timestamp| {
        on_frame(&governor, &refresh, timestamp);
    });
    match started {
        Ok(frame_loop) => Some(frame_loop),
        Err(err) => {
            log::warn!(
                "frame sampling disabled: {}",
                crate::dom::js_error_message(&err)
            );
            None
        }
    }
}

#[function_component(PerformanceProvider)]
pub fn performance_provider(props: &Props) -> Html {
    let governor = {
        let probe = props.probe.clone();
        use_mut_ref(move || PerformanceGovernor::with_config(probe, load_governor_config()))
    };
    let revision = use_reducer(Revision::default);
    let refresh = {
        let dispatcher = revision.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(()))
    };

    {
        let governor = governor.clone();
        let refresh = refresh.clone();
        use_effect_with(props.sample_frames, move |sample| {
            let frame_loop = if *sample {
                let visibility = {
                    let governor = governor.clone();
                    crate::visibility::VisibilityWatcher::attach(move |_visible| {
                        governor.borrow_mut().pause_sampling();
                    })
                };
                start_sampling(governor, refresh).map(|frame_loop| (frame_loop, visibility))
            } else {
                None
            };
            move || drop(frame_loop)
        });
    }

    {
        let governor = governor.clone();
        let refresh = refresh.clone();
        use_effect_with((), move |()| {
            let watcher = crate::motion::ReducedMotionWatcher::attach(move |reduced| {
                governor.borrow_mut().on_reduced_motion_changed(reduced);
                refresh.emit(());
            });
            move || drop(watcher)
        });
    }

    {
        let tier: QualityTier = governor.borrow().policy().tier;
        use_effect_with(tier, |tier| {
            crate::a11y::set_quality_class(*tier);
            || {}
        });
    }

    let handle = PerformanceHandle {
        governor,
        revision: revision.0,
        refresh,
    };

    html! {
        <ContextProvider<PerformanceHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<PerformanceHandle>>
    }
}

/// Access the page governor. `None` outside a [`PerformanceProvider`].
#[hook]
pub fn use_performance() -> Option<PerformanceHandle> {
    use_context::<PerformanceHandle>()
}
