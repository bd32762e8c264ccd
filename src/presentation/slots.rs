use super::charts::{ChartPayload, ChartSlot};

/// 차트를 실제로 그리는 쪽. 그린 결과(`Instance`)는 위치 등록부가 소유한다.
pub trait ChartRenderer {
    type Instance;
    type Error;

    /// 차트를 새로 그린다.
    fn draw(&mut self, slot: ChartSlot, chart: &ChartPayload) -> Result<Self::Instance, Self::Error>;

    /// 이전에 그린 차트를 해제한다.
    fn release(&mut self, slot: ChartSlot, instance: Self::Instance) -> Result<(), Self::Error>;
}

/// 위치별로 현재 그려진 차트를 하나씩 소유하는 등록부.
#[derive(Debug)]
pub struct ChartSlots<I> {
    instances: [Option<I>; 4],
}

impl<I> Default for ChartSlots<I> {
    fn default() -> Self {
        Self {
            instances: [None, None, None, None],
        }
    }
}

impl<I> ChartSlots<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&I> {
        self.instances[slot.index()].as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.iter().all(Option::is_none)
    }

    /// 위치의 기존 차트를 해제한 뒤 새 차트로 교체한다.
    ///
    /// 그리기가 실패하면 위치는 빈 상태로 남는다.
    pub fn replace<R>(
        &mut self,
        renderer: &mut R,
        slot: ChartSlot,
        chart: &ChartPayload,
    ) -> Result<&I, R::Error>
    where
        R: ChartRenderer<Instance = I>,
    {
        let entry = &mut self.instances[slot.index()];
        if let Some(previous) = entry.take() {
            renderer.release(slot, previous)?;
        }
        let drawn = renderer.draw(slot, chart)?;
        Ok(&*entry.insert(drawn))
    }

    /// 네 위치를 모두 다시 그린다.
    pub fn render_all<R>(
        &mut self,
        renderer: &mut R,
        charts: &[(ChartSlot, ChartPayload)],
    ) -> Result<(), R::Error>
    where
        R: ChartRenderer<Instance = I>,
    {
        for (slot, chart) in charts {
            self.replace(renderer, *slot, chart)?;
        }
        Ok(())
    }

    /// 모든 차트를 해제하고 위치를 비운다.
    pub fn clear<R>(&mut self, renderer: &mut R) -> Result<(), R::Error>
    where
        R: ChartRenderer<Instance = I>,
    {
        for slot in ChartSlot::ALL {
            if let Some(previous) = self.instances[slot.index()].take() {
                renderer.release(slot, previous)?;
            }
        }
        Ok(())
    }
}
