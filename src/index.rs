use std::ops::ControlFlow;

use crate::{
    component::PortComponent,
    port::{Port, PortDirection, PortKind},
};

/// Which port shapes a traversal should see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindFilter {
    Audio,
    Midi,
    Any,
}

impl KindFilter {
    #[inline(always)]
    fn matches(self, kind: PortKind) -> bool {
        match self {
            KindFilter::Audio => kind == PortKind::Audio,
            KindFilter::Midi => kind == PortKind::Midi,
            KindFilter::Any => true,
        }
    }
}

/// Which directions a traversal should see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionFilter {
    Input,
    Output,
    All,
}

impl DirectionFilter {
    #[inline(always)]
    fn matches(self, direction: PortDirection) -> bool {
        match self {
            DirectionFilter::Input => direction == PortDirection::Input,
            DirectionFilter::Output => direction == PortDirection::Output,
            DirectionFilter::All => true,
        }
    }
}

impl From<PortDirection> for DirectionFilter {
    fn from(direction: PortDirection) -> Self {
        match direction {
            PortDirection::Input => DirectionFilter::Input,
            PortDirection::Output => DirectionFilter::Output,
        }
    }
}

/// A kind and direction pair narrowing a traversal.
///
/// The component itself knows nothing about filtering; everything in this
/// module runs over `&PortComponent` from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortQuery {
    pub kind: KindFilter,
    pub direction: DirectionFilter,
}

impl PortQuery {
    pub const fn new(kind: KindFilter, direction: DirectionFilter) -> Self {
        Self { kind, direction }
    }

    /// Every port.
    pub const fn any() -> Self {
        Self::new(KindFilter::Any, DirectionFilter::All)
    }

    pub const fn audio(direction: DirectionFilter) -> Self {
        Self::new(KindFilter::Audio, direction)
    }

    pub const fn midi(direction: DirectionFilter) -> Self {
        Self::new(KindFilter::Midi, direction)
    }

    #[inline(always)]
    pub fn matches(&self, port: &Port) -> bool {
        self.kind.matches(port.kind()) && self.direction.matches(port.direction())
    }
}

/// Matching ports in component order: inputs before outputs, registration
/// order inside each partition.
pub fn ports<'a>(
    component: &'a PortComponent,
    query: PortQuery,
) -> impl Iterator<Item = &'a Port> {
    component
        .inputs()
        .iter()
        .chain(component.outputs().iter())
        .filter(move |port| query.matches(port))
}

pub fn ports_mut<'a>(
    component: &'a mut PortComponent,
    query: PortQuery,
) -> impl Iterator<Item = &'a mut Port> {
    let (inputs, outputs) = component.split_mut();

    inputs
        .iter_mut()
        .chain(outputs.iter_mut())
        .filter(move |port| query.matches(port))
}

/// Visit matching ports with a zero-based index counting only matches seen
/// so far, stopping early when the visitor breaks.
pub fn iterate<F>(component: &PortComponent, query: PortQuery, mut visit: F)
where
    F: FnMut(&Port, usize) -> ControlFlow<()>,
{
    for (filtered_index, port) in ports(component, query).enumerate() {
        if visit(port, filtered_index).is_break() {
            return;
        }
    }
}

/// The n-th matching port, or `None` when fewer than `n + 1` match.
pub fn port_at(component: &PortComponent, query: PortQuery, n: usize) -> Option<&Port> {
    ports(component, query).nth(n)
}

pub fn port_at_mut(
    component: &mut PortComponent,
    query: PortQuery,
    n: usize,
) -> Option<&mut Port> {
    ports_mut(component, query).nth(n)
}

/// How many ports match the query.
pub fn count_ports(component: &PortComponent, query: PortQuery) -> usize {
    ports(component, query).count()
}

/// One slot of the flattened index space hosts with flat port tables
/// enumerate. Audio ports occupy one slot per channel; every other port
/// occupies a single slot.
#[derive(Debug)]
pub struct FlatSlot<'a> {
    pub port: &'a Port,
    pub channel: Option<usize>,
}

#[derive(Debug)]
pub struct FlatSlotMut<'a> {
    pub port: &'a mut Port,
    pub channel: Option<usize>,
}

#[inline(always)]
fn flat_span(port: &Port) -> usize {
    match port {
        Port::Audio(port) => port.channel_count(),
        _ => 1,
    }
}

/// Every flat slot in component order; the flat index is the iteration
/// position.
pub fn flat_slots<'a>(component: &'a PortComponent) -> impl Iterator<Item = FlatSlot<'a>> {
    ports(component, PortQuery::any()).flat_map(|port| {
        (0..flat_span(port)).map(move |n| FlatSlot {
            port,
            channel: match port {
                Port::Audio(_) => Some(n),
                _ => None,
            },
        })
    })
}

/// Visit every flat slot with its flat index: audio ports once per
/// channel, anything else exactly once. Early termination as [iterate].
pub fn iterate_flat<F>(component: &PortComponent, mut visit: F)
where
    F: FnMut(&Port, usize) -> ControlFlow<()>,
{
    let mut flat_index = 0;

    for port in ports(component, PortQuery::any()) {
        for _ in 0..flat_span(port) {
            if visit(port, flat_index).is_break() {
                return;
            }
            flat_index += 1;
        }
    }
}

/// Total flat slots: one per audio channel plus one per non-audio port.
pub fn count_flat(component: &PortComponent) -> usize {
    flat_slots(component).count()
}

pub fn flat_at(component: &PortComponent, flat_index: usize) -> Option<FlatSlot<'_>> {
    flat_slots(component).nth(flat_index)
}

/// Mutable lookup of one flat slot.
///
/// No mutable flat iterator exists: an audio port would hand out one
/// `&mut` per channel.
pub fn flat_at_mut(component: &mut PortComponent, flat_index: usize) -> Option<FlatSlotMut<'_>> {
    let mut remaining = flat_index;
    let mut target = None;

    for (index, port) in ports(component, PortQuery::any()).enumerate() {
        let span = flat_span(port);

        if remaining < span {
            let channel = match port {
                Port::Audio(_) => Some(remaining),
                _ => None,
            };
            target = Some((index, channel));
            break;
        }

        remaining -= span;
    }

    let (index, channel) = target?;

    Some(FlatSlotMut {
        port: component.at_mut(index)?,
        channel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::speaker::SpeakerConfiguration;

    // In (audio, stereo) and Events (midi) feed the component; Out
    // (audio, stereo), Aux (audio, mono) and EventsOut (midi) leave it.
    fn demo_component() -> PortComponent {
        PortComponent::builder()
            .audio_in("In", SpeakerConfiguration::STEREO)
            .midi_in("Events")
            .audio_out("Out", SpeakerConfiguration::STEREO)
            .audio_out("Aux", SpeakerConfiguration::MONO)
            .midi_out("EventsOut")
            .build()
    }

    fn visited_names(component: &PortComponent, query: PortQuery) -> Vec<(String, usize)> {
        let mut seen = Vec::new();
        iterate(component, query, |port, filtered_index| {
            seen.push((port.name().to_owned(), filtered_index));
            ControlFlow::Continue(())
        });
        seen
    }

    #[test]
    fn directional_counts_sum_to_all() {
        let component = demo_component();

        for kind in [KindFilter::Audio, KindFilter::Midi, KindFilter::Any] {
            let inputs = count_ports(&component, PortQuery::new(kind, DirectionFilter::Input));
            let outputs = count_ports(&component, PortQuery::new(kind, DirectionFilter::Output));
            let all = count_ports(&component, PortQuery::new(kind, DirectionFilter::All));

            assert_eq!(inputs + outputs, all);
        }

        assert_eq!(
            count_ports(&component, PortQuery::any()),
            component.len()
        );
    }

    #[test]
    fn filtered_index_counts_matches_only() {
        let component = demo_component();

        assert_eq!(
            visited_names(&component, PortQuery::audio(DirectionFilter::All)),
            vec![
                ("In".to_owned(), 0),
                ("Out".to_owned(), 1),
                ("Aux".to_owned(), 2),
            ]
        );

        assert_eq!(
            visited_names(&component, PortQuery::midi(DirectionFilter::Output)),
            vec![("EventsOut".to_owned(), 0)]
        );
    }

    #[test]
    fn visitors_can_break_early() {
        let component = demo_component();
        let mut visits = 0;

        iterate(&component, PortQuery::any(), |_, filtered_index| {
            visits += 1;
            if filtered_index == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(visits, 2);
    }

    #[test]
    fn port_at_walks_the_filtered_sequence() {
        let component = demo_component();

        let query = PortQuery::audio(DirectionFilter::Output);

        assert_eq!(port_at(&component, query, 0).unwrap().name(), "Out");
        assert_eq!(port_at(&component, query, 1).unwrap().name(), "Aux");
        assert!(port_at(&component, query, 2).is_none());
    }

    #[test]
    fn flat_slots_expand_audio_channels() {
        let component = demo_component();

        let slots: Vec<(String, Option<usize>)> = flat_slots(&component)
            .map(|slot| (slot.port.name().to_owned(), slot.channel))
            .collect();

        assert_eq!(
            slots,
            vec![
                ("In".to_owned(), Some(0)),
                ("In".to_owned(), Some(1)),
                ("Events".to_owned(), None),
                ("Out".to_owned(), Some(0)),
                ("Out".to_owned(), Some(1)),
                ("Aux".to_owned(), Some(0)),
                ("EventsOut".to_owned(), None),
            ]
        );

        assert_eq!(count_flat(&component), 7);
    }

    #[test]
    fn flat_indices_are_contiguous_from_zero() {
        let component = demo_component();
        let mut expected = 0;

        iterate_flat(&component, |_, flat_index| {
            assert_eq!(flat_index, expected);
            expected += 1;
            ControlFlow::Continue(())
        });

        assert_eq!(expected, count_flat(&component));
    }

    #[test]
    fn flat_lookup_by_index() {
        let mut component = demo_component();

        let slot = flat_at(&component, 3).unwrap();
        assert_eq!(slot.port.name(), "Out");
        assert_eq!(slot.channel, Some(0));

        let slot = flat_at(&component, 2).unwrap();
        assert_eq!(slot.port.name(), "Events");
        assert_eq!(slot.channel, None);

        assert!(flat_at(&component, 7).is_none());

        let slot = flat_at_mut(&mut component, 5).unwrap();
        assert_eq!(slot.port.name(), "Aux");
        assert_eq!(slot.channel, Some(0));

        assert!(flat_at_mut(&mut component, 7).is_none());
    }

    #[test]
    fn mutable_traversal_reaches_matching_ports_only() {
        let mut component = demo_component();

        for port in ports_mut(&mut component, PortQuery::audio(DirectionFilter::All)) {
            if let Port::Audio(audio) = port {
                audio.set_sample_count(128);
            }
        }

        for port in ports(&component, PortQuery::audio(DirectionFilter::All)) {
            assert_eq!(port.as_audio().unwrap().sample_count(), 128);
        }
    }

    #[test]
    fn empty_component_yields_nothing() {
        let component = PortComponent::new();

        assert_eq!(count_ports(&component, PortQuery::any()), 0);
        assert_eq!(count_flat(&component), 0);
        assert!(port_at(&component, PortQuery::any(), 0).is_none());
        assert!(flat_at(&component, 0).is_none());
    }
}
