use fecore::element::{FiniteElementBase, FiniteElementData};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rlst::Shape;

const SAMPLES: usize = 50;

fn check_partition<const DIM: usize>(data: &FiniteElementData<DIM>) {
    let mut owners = vec![None; data.total_dofs()];
    for entity_dim in 0..=DIM {
        let mut entity_number = 0;
        while let Some(range) = data.entity_dofs(entity_dim, entity_number) {
            for dof in range.clone() {
                assert!(owners[dof].is_none());
                owners[dof] = Some((entity_dim, entity_number, dof - range.start));
            }
            entity_number += 1;
        }
    }
    for (dof, owner) in owners.iter().enumerate() {
        assert_eq!(*owner, data.dof_entity(dof));
        assert!(owner.is_some());
    }
    assert_eq!(data.dof_entity(data.total_dofs()), None);
}

fn check_default_tables<const DIM: usize>(base: &FiniteElementBase<f64, DIM>) {
    let data = base.data();
    for i in 0..data.total_dofs() {
        let (component, index) = base.system_to_component_index(i).unwrap();
        assert_eq!(base.component_to_system_index(component, index).unwrap(), i);
    }
    for i in 0..data.dofs_per_face() {
        let (component, index) = base.face_system_to_component_index(i).unwrap();
        assert_eq!(
            base.face_component_to_system_index(component, index).unwrap(),
            i
        );
    }
}

#[test]
fn test_random_layouts_1d() {
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..SAMPLES {
        let v = rng.gen_range(0..4);
        let l = rng.gen_range(0..6);
        let data = FiniteElementData::<1>::new_1d(v, l, 2, 1).unwrap();
        assert_eq!(data.total_dofs(), 2 * v + l);
        assert_eq!(data.dofs_per_face(), v);
        assert_eq!(data.first_line_index(), 2 * v);
        check_partition(&data);

        let base = FiniteElementBase::<f64, 1>::new(data).unwrap();
        assert_eq!(base.constraints().unwrap().shape(), [1, 1]);
        check_default_tables(&base);
    }
}

#[test]
fn test_random_layouts_2d() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..SAMPLES {
        let v = rng.gen_range(0..3);
        let l = rng.gen_range(0..4);
        let q = rng.gen_range(0..5);
        let data = FiniteElementData::<2>::new_2d(v, l, q, 4, 1).unwrap();
        assert_eq!(data.total_dofs(), 4 * v + 4 * l + q);
        assert_eq!(data.dofs_per_face(), 2 * v + l);
        assert_eq!(data.first_quad_index(), 4 * v + 4 * l);
        assert_eq!(data.first_face_line_index(), 2 * v);
        check_partition(&data);

        let base = FiniteElementBase::<f64, 2>::new(data).unwrap();
        assert_eq!(
            base.constraints().unwrap().shape(),
            [v + 2 * l, 2 * v + l]
        );
        assert_eq!(base.children_per_cell(), 4);
        check_default_tables(&base);
    }
}

#[test]
fn test_random_layouts_3d() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..SAMPLES {
        let v = rng.gen_range(0..3);
        let l = rng.gen_range(0..3);
        let q = rng.gen_range(0..3);
        let h = rng.gen_range(0..4);
        let data = FiniteElementData::<3>::new_3d(v, l, q, h, 8, 1).unwrap();
        assert_eq!(data.total_dofs(), 8 * v + 12 * l + 6 * q + h);
        assert_eq!(data.dofs_per_face(), 4 * v + 4 * l + q);
        assert_eq!(data.first_hex_index(), 8 * v + 12 * l + 6 * q);
        assert_eq!(data.first_face_quad_index(), 4 * v + 4 * l);
        check_partition(&data);

        let base = FiniteElementBase::<f64, 3>::new(data).unwrap();
        assert_eq!(
            base.constraints().unwrap().shape(),
            [5 * v + 12 * l + 4 * q, 4 * v + 4 * l + q]
        );
        assert_eq!(base.children_per_cell(), 8);
        assert_eq!(base.subfaces_per_face(), 4);
        check_default_tables(&base);
    }
}

#[test]
fn test_equality_is_symmetric() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..SAMPLES {
        let a = FiniteElementData::<2>::new_2d(
            rng.gen_range(0..2),
            rng.gen_range(0..2),
            rng.gen_range(0..2),
            4,
            1,
        )
        .unwrap();
        let b = FiniteElementData::<2>::new_2d(
            rng.gen_range(0..2),
            rng.gen_range(0..2),
            rng.gen_range(0..2),
            4,
            1,
        )
        .unwrap();
        assert_eq!(a == b, b == a);
        assert_eq!(a, a);
        let base_a = FiniteElementBase::<f64, 2>::new(a).unwrap();
        let base_b = FiniteElementBase::<f64, 2>::new(b).unwrap();
        assert_eq!(base_a == base_b, a == b);
    }
}
