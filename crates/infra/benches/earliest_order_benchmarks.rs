use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, NaiveDate};
use supplyline_infra::{FixedClock, InMemoryStore, ProcurementService};
use supplyline_procurement::{
    Agreement, CreatePurchaseAgreement, CreatePurchaseOrder, Plant, ReceivePurchaseOrder, Vendor,
};

type Service = ProcurementService<InMemoryStore, FixedClock>;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// A plant with one large agreement and `orders` received orders, half of them
/// standalone.
fn seeded_service(orders: usize) -> (Service, Plant, Vendor, Agreement) {
    let service = ProcurementService::with_clock(InMemoryStore::new(), FixedClock(today()));
    let plant = service.register_plant("Bench Plant").unwrap();
    let vendor = service.register_vendor("Bench Vendor").unwrap();
    let agreement = service
        .create_purchase_agreement(CreatePurchaseAgreement {
            plant_id: plant.id,
            vendor_id: vendor.id,
            start: today() - Duration::days(400),
            end: today() + Duration::days(400),
            quantity: i64::MAX,
        })
        .unwrap();

    for i in 0..orders {
        let ordered = today() - Duration::days((i % 300) as i64);
        let cmd = if i % 2 == 0 {
            CreatePurchaseOrder::against_agreement(agreement.id, 1)
        } else {
            CreatePurchaseOrder::standalone(vendor.id, plant.id, 1)
        };
        let order = service.create_purchase_order(cmd.ordered_on(ordered)).unwrap();
        service
            .receive_purchase_order(ReceivePurchaseOrder::new(order.id).delivered_on(ordered))
            .unwrap();
    }

    (service, plant, vendor, agreement)
}

fn bench_earliest_plant_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("earliest_plant_order");

    for size in [100usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("received_orders", size), size, |b, &size| {
            let (service, plant, _, _) = seeded_service(size);
            b.iter(|| black_box(service.get_earliest_plant_order(plant.id).unwrap()));
        });
    }

    group.finish();
}

fn bench_order_creation_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_creation_latency");

    for existing in [0usize, 1_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("against_agreement", existing),
            existing,
            |b, &existing| {
                let (service, _, _, agreement) = seeded_service(existing);
                b.iter(|| {
                    black_box(
                        service
                            .create_purchase_order(CreatePurchaseOrder::against_agreement(
                                agreement.id,
                                1,
                            ))
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_earliest_plant_order, bench_order_creation_latency);
criterion_main!(benches);
